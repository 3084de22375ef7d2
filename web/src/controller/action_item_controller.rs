use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::params::action_item::{CreateParams, IndexParams, UpdateParams};
use crate::{AppState, Error};
use domain::{action_item as ActionItemApi, action_items, Id};
use log::*;

/// GET all Action Items, optionally filtered by transcript and/or status.
#[utoipa::path(
    get,
    path = "/action-items/",
    params(IndexParams),
    responses(
        (status = 200, description = "Successfully retrieved the matching Action Items", body = [action_items::Model]),
        (status = 400, description = "Unknown status or malformed transcript_id"),
    ),
    tag = "action-items"
)]
pub async fn index(
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Action Items");
    debug!("Filter Params: {params:?}");

    let action_items = ActionItemApi::find_by(app_state.db_conn_ref(), params).await?;

    debug!("Found {} Action Items", action_items.len());

    Ok(Json(action_items))
}

/// GET a particular Action Item specified by its id.
#[utoipa::path(
    get,
    path = "/action-items/{id}",
    params(
        ("id" = i32, Path, description = "Action Item id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Action Item by its id", body = action_items::Model),
        (status = 404, description = "Action item not found"),
    ),
    tag = "action-items"
)]
pub async fn read(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Action Item by id: {id}");

    let action_item = ActionItemApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(action_item))
}

/// POST create a new Action Item on an existing Transcript
#[utoipa::path(
    post,
    path = "/action-items/",
    request_body = CreateParams,
    responses(
        (status = 200, description = "Successfully Created a New Action Item", body = action_items::Model),
        (status = 404, description = "Transcript not found"),
        (status = 422, description = "Unprocessable Entity"),
    ),
    tag = "action-items"
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(params): Json<CreateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Action Item from: {params:?}");

    let (transcript_id, new_action_item) = params.into_parts();
    let action_item =
        ActionItemApi::create(app_state.db_conn_ref(), transcript_id, new_action_item).await?;

    debug!("New Action Item: {action_item:?}");

    Ok(Json(action_item))
}

/// PUT a partial update of an Action Item. Fields missing from the body are left untouched.
#[utoipa::path(
    put,
    path = "/action-items/{id}",
    params(
        ("id" = i32, Path, description = "Id of the Action Item to update"),
    ),
    request_body = UpdateParams,
    responses(
        (status = 200, description = "Successfully Updated Action Item", body = action_items::Model),
        (status = 404, description = "Action item not found"),
        (status = 422, description = "Unprocessable Entity"),
    ),
    tag = "action-items"
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Action Item with id: {id}");

    let action_item =
        ActionItemApi::update(app_state.db_conn_ref(), id, params.into()).await?;

    debug!("Updated Action Item: {action_item:?}");

    Ok(Json(action_item))
}

/// PATCH an Action Item to `completed`. Repeating the call is harmless.
#[utoipa::path(
    patch,
    path = "/action-items/{id}/complete",
    params(
        ("id" = i32, Path, description = "Id of the Action Item to complete"),
    ),
    responses(
        (status = 200, description = "Action Item is completed", body = action_items::Model),
        (status = 404, description = "Action item not found"),
    ),
    tag = "action-items"
)]
pub async fn complete(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("PATCH Complete Action Item with id: {id}");

    let action_item = ActionItemApi::mark_complete(app_state.db_conn_ref(), id).await?;

    Ok(Json(action_item))
}

/// DELETE an Action Item specified by its primary key.
#[utoipa::path(
    delete,
    path = "/action-items/{id}",
    params(
        ("id" = i32, Path, description = "Action Item id to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted the Action Item"),
        (status = 404, description = "Action item not found"),
    ),
    tag = "action-items"
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Action Item by id: {id}");

    ActionItemApi::delete_by_id(app_state.db_conn_ref(), id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Action item deleted successfully" })),
    ))
}
