use super::error::Error;
use crate::query::{self, QueryFilterMap};
use entity::action_item_status::ActionItemStatus;
use entity::action_items::{ActiveModel, Column, Entity, Model};
use entity::{transcripts, Id};
use log::*;
use sea_orm::{entity::prelude::*, ActiveValue::Set, ConnectionTrait, DatabaseConnection};

/// Fields needed to insert an action item, whichever way it was produced
/// (entered directly or extracted from a transcript).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewActionItem {
    pub task: String,
    pub owner: Option<String>,
    pub due_date: Option<String>,
    pub status: ActionItemStatus,
    pub tags: Option<String>,
}

/// An explicit partial update of an action item.
///
/// A field left as `None` is not touched. For the nullable columns the inner
/// `Option` is the new value, so `Some(None)` clears the column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionItemPatch {
    pub task: Option<String>,
    pub owner: Option<Option<String>>,
    pub due_date: Option<Option<String>>,
    pub status: Option<ActionItemStatus>,
    pub tags: Option<Option<String>>,
}

impl ActionItemPatch {
    pub fn is_empty(&self) -> bool {
        self.task.is_none()
            && self.owner.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
            && self.tags.is_none()
    }

    /// Overwrites only the fields present in the patch and stamps `updated_at`.
    pub fn apply(self, model: Model) -> ActiveModel {
        let mut active_model: ActiveModel = model.into();

        if let Some(task) = self.task {
            active_model.task = Set(task);
        }
        if let Some(owner) = self.owner {
            active_model.owner = Set(owner);
        }
        if let Some(due_date) = self.due_date {
            active_model.due_date = Set(due_date);
        }
        if let Some(status) = self.status {
            active_model.status = Set(status);
        }
        if let Some(tags) = self.tags {
            active_model.tags = Set(tags);
        }
        active_model.updated_at = Set(Some(crate::now()));

        active_model
    }
}

/// Inserts an action item owned by `transcript_id` without checking that the
/// transcript exists. Callers inside a transaction that just created the
/// transcript use this directly.
pub(crate) async fn insert(
    db: &impl ConnectionTrait,
    transcript_id: Id,
    new_action_item: NewActionItem,
) -> Result<Model, Error> {
    let active_model = ActiveModel {
        task: Set(new_action_item.task),
        owner: Set(new_action_item.owner),
        due_date: Set(new_action_item.due_date),
        status: Set(new_action_item.status),
        tags: Set(new_action_item.tags),
        created_at: Set(crate::now()),
        updated_at: Set(None),
        transcript_id: Set(transcript_id),
        ..Default::default()
    };

    Ok(active_model.insert(db).await?)
}

pub async fn create(
    db: &DatabaseConnection,
    transcript_id: Id,
    new_action_item: NewActionItem,
) -> Result<Model, Error> {
    debug!("New Action Item to be inserted for transcript {transcript_id}: {new_action_item:?}");

    if transcripts::Entity::find_by_id(transcript_id)
        .one(db)
        .await?
        .is_none()
    {
        debug!("Transcript with id {transcript_id} not found");
        return Err(Error::record_not_found("Transcript not found"));
    }

    insert(db, transcript_id, new_action_item).await
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::record_not_found("Action item not found"))
}

pub async fn find_by(
    db: &DatabaseConnection,
    query_filter_map: QueryFilterMap,
) -> Result<Vec<Model>, Error> {
    query::find_by::<Entity, Column>(db, query_filter_map).await
}

/// Applies `patch` to the action item. An empty patch is a no-op that returns
/// the stored item untouched.
pub async fn update(db: &DatabaseConnection, id: Id, patch: ActionItemPatch) -> Result<Model, Error> {
    let action_item = find_by_id(db, id).await?;

    if patch.is_empty() {
        debug!("Empty patch for Action Item {id}, nothing to update");
        return Ok(action_item);
    }

    debug!("Existing Action Item to be updated: {action_item:?}");

    Ok(patch.apply(action_item).update(db).await?)
}

/// Moves the action item to `completed`. Calling it on a completed item only
/// refreshes `updated_at`.
pub async fn mark_complete(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    let action_item = find_by_id(db, id).await?;

    let patch = ActionItemPatch {
        status: Some(ActionItemStatus::Completed),
        ..Default::default()
    };

    Ok(patch.apply(action_item).update(db).await?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    let action_item = find_by_id(db, id).await?;

    Entity::delete_by_id(action_item.id).exec(db).await?;

    Ok(())
}


#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod mock_tests {
    use super::*;
    use crate::error::EntityApiErrorKind;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn action_item_model(status: ActionItemStatus) -> Model {
        let now = chrono::Utc::now();
        Model {
            id: 1,
            task: "Send the budget draft".to_owned(),
            owner: None,
            due_date: None,
            status,
            tags: None,
            created_at: now.into(),
            updated_at: None,
            transcript_id: 10,
        }
    }

    fn transcript_model() -> transcripts::Model {
        transcripts::Model {
            id: 10,
            title: "Standup".to_owned(),
            content: "Bob will send the budget draft".to_owned(),
            created_at: chrono::Utc::now().into(),
            processed_at: None,
        }
    }

    #[tokio::test]
    async fn create_returns_a_new_action_item_model() -> Result<(), Error> {
        let action_item = action_item_model(ActionItemStatus::Pending);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![transcript_model()]])
            .append_query_results(vec![vec![action_item.clone()]])
            .into_connection();

        let created = create(
            &db,
            10,
            NewActionItem {
                task: action_item.task.clone(),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(created.id, action_item.id);
        assert_eq!(created.transcript_id, 10);

        Ok(())
    }

    #[tokio::test]
    async fn create_returns_not_found_when_transcript_is_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<transcripts::Model>::new()])
            .into_connection();

        let result = create(&db, 99, NewActionItem::default()).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound("Transcript not found".to_string())
        );
    }

    #[tokio::test]
    async fn update_with_empty_patch_does_not_write() -> Result<(), Error> {
        let action_item = action_item_model(ActionItemStatus::Pending);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![action_item.clone()]])
            .into_connection();

        let updated = update(&db, action_item.id, ActionItemPatch::default()).await?;

        assert_eq!(updated, action_item);
        assert_eq!(db.into_transaction_log().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn mark_complete_returns_a_completed_model() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![action_item_model(ActionItemStatus::Pending)]])
            .append_query_results(vec![vec![action_item_model(ActionItemStatus::Completed)]])
            .into_connection();

        let action_item = mark_complete(&db, 1).await?;

        assert_eq!(action_item.status, ActionItemStatus::Completed);

        Ok(())
    }

    #[tokio::test]
    async fn mark_complete_returns_error_when_action_item_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let result = mark_complete(&db, 1).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound("Action item not found".to_string())
        );
    }

    #[tokio::test]
    async fn delete_by_id_removes_an_existing_action_item() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![action_item_model(ActionItemStatus::Pending)]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        delete_by_id(&db, 1).await?;

        Ok(())
    }
}
