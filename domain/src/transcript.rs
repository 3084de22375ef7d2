use crate::error::Error;
use crate::extraction::Extractor;
use crate::Id;
use entity_api::action_item::NewActionItem;
use entity_api::transcript;
use log::*;
use sea_orm::DatabaseConnection;

pub use entity_api::transcript::TranscriptWithActionItems;

/// Number of transcripts listed when the caller does not ask for a specific amount.
pub const DEFAULT_RECENT_LIMIT: u64 = 5;

/// Extracts action items from `content` and stores the transcript with them.
///
/// Extraction happens before anything is written and never fails; a transcript
/// the model finds nothing in is stored with no action items.
pub async fn create(
    db: &DatabaseConnection,
    extractor: &Extractor,
    title: String,
    content: String,
) -> Result<TranscriptWithActionItems, Error> {
    let extracted = extractor.extract(&content).await;
    info!(
        "Extracted {} action items from transcript \"{title}\"",
        extracted.len()
    );

    let new_action_items: Vec<NewActionItem> = extracted.into_iter().map(Into::into).collect();

    Ok(transcript::create_with_action_items(db, title, content, new_action_items).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<TranscriptWithActionItems, Error> {
    Ok(transcript::find_by_id_with_action_items(db, id).await?)
}

pub async fn find_recent(
    db: &DatabaseConnection,
    limit: Option<u64>,
) -> Result<Vec<TranscriptWithActionItems>, Error> {
    Ok(transcript::find_recent(db, limit.unwrap_or(DEFAULT_RECENT_LIMIT)).await?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    Ok(transcript::delete_by_id(db, id).await?)
}
