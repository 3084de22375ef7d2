use sea_orm_migration::prelude::*;

use crate::m20260105_000002_create_action_items_table::ActionItems;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Both columns back the optional filters on GET /action-items
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("action_items_transcript_id")
                    .table(ActionItems::Table)
                    .col(ActionItems::TranscriptId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("action_items_status")
                    .table(ActionItems::Table)
                    .col(ActionItems::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("action_items_status")
                    .table(ActionItems::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("action_items_transcript_id")
                    .table(ActionItems::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
