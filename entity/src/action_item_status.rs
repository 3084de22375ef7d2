use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of an action item.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    EnumIter,
    Deserialize,
    Default,
    Serialize,
    DeriveActiveEnum,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ActionItemStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl std::fmt::Display for ActionItemStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionItemStatus::Pending => write!(fmt, "pending"),
            ActionItemStatus::Completed => write!(fmt, "completed"),
        }
    }
}

impl std::str::FromStr for ActionItemStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(ActionItemStatus::Pending),
            "completed" => Ok(ActionItemStatus::Completed),
            other => Err(format!(
                "unknown status `{other}`, expected `pending` or `completed`"
            )),
        }
    }
}
