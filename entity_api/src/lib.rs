use chrono::Utc;
use log::info;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait};

pub use entity::{action_item_status, action_items, transcripts, Id};

pub mod action_item;
pub mod error;
pub mod query;
pub mod transcript;

use action_item::NewActionItem;
use action_item_status::ActionItemStatus;

/// Inserts a demo transcript with a couple of action items when the database holds
/// no transcripts yet. Returns whether anything was written.
pub async fn seed_database(db: &DatabaseConnection) -> Result<bool, error::Error> {
    if transcripts::Entity::find().count(db).await? > 0 {
        info!("Database already holds transcripts, skipping seed");
        return Ok(false);
    }

    let content = "Alice: Thanks everyone. Bob, can you send the Q3 budget draft by Friday?\n\
                   Bob: Sure, I'll have it out by Friday.\n\
                   Alice: Carol will book the offsite venue next week.";

    let seeded = transcript::create_with_action_items(
        db,
        "Weekly planning sync".to_owned(),
        content.to_owned(),
        vec![
            NewActionItem {
                task: "Send the Q3 budget draft".to_owned(),
                owner: Some("Bob".to_owned()),
                due_date: Some("Friday".to_owned()),
                status: ActionItemStatus::Pending,
                tags: Some("finance, budget".to_owned()),
            },
            NewActionItem {
                task: "Book the offsite venue".to_owned(),
                owner: Some("Carol".to_owned()),
                due_date: Some("next week".to_owned()),
                status: ActionItemStatus::Pending,
                tags: Some("events".to_owned()),
            },
        ],
    )
    .await?;

    info!(
        "Seeded transcript {} with {} action items at {}",
        seeded.transcript.id,
        seeded.action_items.len(),
        Utc::now()
    );

    Ok(true)
}

/// Current time in the representation stored by every timestamp column.
pub(crate) fn now() -> sea_orm::prelude::DateTimeWithTimeZone {
    Utc::now().fixed_offset()
}

/// Round trip used by the health check to prove the database answers.
pub async fn ping(db: &DatabaseConnection) -> Result<(), error::Error> {
    db.execute_unprepared("SELECT 1").await?;
    Ok(())
}
