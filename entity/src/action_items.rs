//! SeaORM Entity for the action_items table.

use crate::action_item_status::ActionItemStatus;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::action_items::Model)]
#[sea_orm(table_name = "action_items")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    /// What needs to be done
    #[sea_orm(column_type = "Text")]
    pub task: String,

    /// Person responsible, if one was named
    pub owner: Option<String>,

    /// Free-text due date, kept in whatever format the meeting used
    pub due_date: Option<String>,

    #[serde(default)]
    pub status: ActionItemStatus,

    /// Comma-separated tags
    pub tags: Option<String>,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,

    /// Null until the first mutating write
    #[serde(skip_deserializing)]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub updated_at: Option<DateTimeWithTimeZone>,

    pub transcript_id: Id,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::transcripts::Entity",
        from = "Column::TranscriptId",
        to = "super::transcripts::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Transcripts,
}

impl Related<super::transcripts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transcripts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
