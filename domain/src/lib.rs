//! Business operations of the meeting tracker.
//!
//! Entity models and query filter helpers are re-exported from `entity_api` so
//! that `web` never has to depend on the data layer directly.
pub use entity_api::query::{IntoQueryFilterMap, QueryFilterMap};

// Re-exports from `entity` crate via `entity_api`
pub use entity_api::{action_item_status, action_items, transcripts, Id};

pub mod action_item;
pub mod error;
pub mod extraction;
pub mod health;
pub mod llm;
pub mod transcript;

pub mod gateway;
