use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transcripts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transcripts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transcripts::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Transcripts::Content).text().not_null())
                    .col(
                        ColumnDef::new(Transcripts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Transcripts::ProcessedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Recent transcripts are always listed newest first
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("transcripts_created_at")
                    .table(Transcripts::Table)
                    .col(Transcripts::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transcripts::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Transcripts {
    Table,
    Id,
    Title,
    Content,
    CreatedAt,
    ProcessedAt,
}
