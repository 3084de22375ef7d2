pub(crate) mod action_item_controller;
pub(crate) mod health_check_controller;
pub(crate) mod root_controller;
pub(crate) mod transcript_controller;
