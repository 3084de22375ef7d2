pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_transcripts_table;
mod m20260105_000002_create_action_items_table;
mod m20260105_000003_add_action_items_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_transcripts_table::Migration),
            Box::new(m20260105_000002_create_action_items_table::Migration),
            Box::new(m20260105_000003_add_action_items_indexes::Migration),
        ]
    }
}
