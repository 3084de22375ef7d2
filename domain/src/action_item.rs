use crate::action_items::Model;
use crate::error::Error;
use crate::Id;
use entity_api::action_item;
use entity_api::query::IntoQueryFilterMap;
use sea_orm::DatabaseConnection;

pub use entity_api::action_item::{ActionItemPatch, NewActionItem};

pub async fn create(
    db: &DatabaseConnection,
    transcript_id: Id,
    new_action_item: NewActionItem,
) -> Result<Model, Error> {
    Ok(action_item::create(db, transcript_id, new_action_item).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Ok(action_item::find_by_id(db, id).await?)
}

pub async fn find_by(
    db: &DatabaseConnection,
    params: impl IntoQueryFilterMap,
) -> Result<Vec<Model>, Error> {
    Ok(action_item::find_by(db, params.into_query_filter_map()).await?)
}

pub async fn update(db: &DatabaseConnection, id: Id, patch: ActionItemPatch) -> Result<Model, Error> {
    Ok(action_item::update(db, id, patch).await?)
}

pub async fn mark_complete(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Ok(action_item::mark_complete(db, id).await?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    Ok(action_item::delete_by_id(db, id).await?)
}
