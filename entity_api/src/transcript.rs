use super::error::Error;
use crate::action_item::{self, NewActionItem};
use entity::action_items;
use entity::transcripts::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, DatabaseConnection, LoaderTrait, QueryOrder, QuerySelect,
    TransactionTrait,
};
use serde::Serialize;
use utoipa::ToSchema;

/// A transcript together with every action item it owns, which is the shape the
/// transcript endpoints return.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct TranscriptWithActionItems {
    #[serde(flatten)]
    pub transcript: Model,
    pub action_items: Vec<action_items::Model>,
}

/// Persists a transcript and its already extracted action items in a single
/// transaction, stamping `processed_at` once the items are written. Nothing is
/// kept if any insert fails.
pub async fn create_with_action_items(
    db: &DatabaseConnection,
    title: String,
    content: String,
    new_action_items: Vec<NewActionItem>,
) -> Result<TranscriptWithActionItems, Error> {
    debug!(
        "New Transcript \"{title}\" to be inserted with {} action items",
        new_action_items.len()
    );

    let txn = db.begin().await?;

    let transcript = ActiveModel {
        title: Set(title),
        content: Set(content),
        created_at: Set(crate::now()),
        processed_at: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut action_items = Vec::with_capacity(new_action_items.len());
    for new_action_item in new_action_items {
        action_items.push(action_item::insert(&txn, transcript.id, new_action_item).await?);
    }

    let mut processed: ActiveModel = transcript.into();
    processed.processed_at = Set(Some(crate::now()));
    let transcript = processed.update(&txn).await?;

    txn.commit().await?;

    Ok(TranscriptWithActionItems {
        transcript,
        action_items,
    })
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| {
        debug!("Transcript with id {id} not found");
        Error::record_not_found("Transcript not found")
    })
}

pub async fn find_by_id_with_action_items(
    db: &DatabaseConnection,
    id: Id,
) -> Result<TranscriptWithActionItems, Error> {
    let transcript = find_by_id(db, id).await?;

    let action_items = transcript
        .find_related(action_items::Entity)
        .order_by_asc(action_items::Column::Id)
        .all(db)
        .await?;

    Ok(TranscriptWithActionItems {
        transcript,
        action_items,
    })
}

/// Returns the `limit` most recently created transcripts, newest first, each
/// with its action items.
pub async fn find_recent(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<TranscriptWithActionItems>, Error> {
    let transcripts = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .limit(limit)
        .all(db)
        .await?;

    if transcripts.is_empty() {
        return Ok(Vec::new());
    }

    let action_items = transcripts.load_many(action_items::Entity, db).await?;

    Ok(transcripts
        .into_iter()
        .zip(action_items)
        .map(|(transcript, mut action_items)| {
            action_items.sort_by_key(|action_item| action_item.id);
            TranscriptWithActionItems {
                transcript,
                action_items,
            }
        })
        .collect())
}

/// Deletes a transcript and all of its action items.
pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    let transcript = find_by_id(db, id).await?;

    let txn = db.begin().await?;

    // Children go first so this holds without foreign key enforcement
    let deleted = action_items::Entity::delete_many()
        .filter(action_items::Column::TranscriptId.eq(transcript.id))
        .exec(&txn)
        .await?;
    Entity::delete_by_id(transcript.id).exec(&txn).await?;

    txn.commit().await?;

    debug!(
        "Deleted Transcript {} and {} action items",
        transcript.id, deleted.rows_affected
    );

    Ok(())
}
