use sea_orm_migration::prelude::*;

use crate::m20260105_000001_create_transcripts_table::Transcripts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActionItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActionItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActionItems::Task).text().not_null())
                    .col(ColumnDef::new(ActionItems::Owner).string_len(100))
                    // Free text: extracted due dates come in whatever format was spoken
                    .col(ColumnDef::new(ActionItems::DueDate).string_len(50))
                    .col(
                        ColumnDef::new(ActionItems::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(ActionItems::Tags).string_len(200))
                    .col(
                        ColumnDef::new(ActionItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ActionItems::UpdatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(ActionItems::TranscriptId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("action_items_transcript_id_fkey")
                            .from(ActionItems::Table, ActionItems::TranscriptId)
                            .to(Transcripts::Table, Transcripts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActionItems::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum ActionItems {
    Table,
    Id,
    Task,
    Owner,
    DueDate,
    Status,
    Tags,
    CreatedAt,
    UpdatedAt,
    TranscriptId,
}
