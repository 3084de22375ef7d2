use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::params::transcript::{CreateParams, IndexParams};
use crate::{AppState, Error};
use domain::transcript::{self as TranscriptApi, TranscriptWithActionItems};
use domain::Id;
use log::*;

/// GET the most recently submitted Transcripts with their Action Items.
#[utoipa::path(
    get,
    path = "/transcripts/",
    params(IndexParams),
    responses(
        (status = 200, description = "Successfully retrieved recent Transcripts, newest first", body = [TranscriptWithActionItems]),
    ),
    tag = "transcripts"
)]
pub async fn index(
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET recent Transcripts, limit: {:?}", params.limit);

    let transcripts = TranscriptApi::find_recent(app_state.db_conn_ref(), params.limit).await?;

    Ok(Json(transcripts))
}

/// GET a particular Transcript and its Action Items.
#[utoipa::path(
    get,
    path = "/transcripts/{id}",
    params(
        ("id" = i32, Path, description = "Transcript id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Transcript by its id", body = TranscriptWithActionItems),
        (status = 404, description = "Transcript not found"),
    ),
    tag = "transcripts"
)]
pub async fn read(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Transcript by id: {id}");

    let transcript = TranscriptApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(transcript))
}

/// POST a new Transcript. Action items are extracted from its content before it is stored.
#[utoipa::path(
    post,
    path = "/transcripts/",
    request_body = CreateParams,
    responses(
        (status = 200, description = "Transcript stored with its extracted Action Items", body = TranscriptWithActionItems),
        (status = 422, description = "Unprocessable Entity"),
        (status = 500, description = "Error processing transcript"),
    ),
    tag = "transcripts"
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(params): Json<CreateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Transcript titled \"{}\"", params.title);

    let transcript = TranscriptApi::create(
        app_state.db_conn_ref(),
        app_state.extractor(),
        params.title,
        params.content,
    )
    .await
    .map_err(|e| Error::from(e).with_detail_prefix("Error processing transcript"))?;

    info!(
        "Created Transcript {} with {} action items",
        transcript.transcript.id,
        transcript.action_items.len()
    );

    Ok(Json(transcript))
}

/// DELETE a Transcript together with all of its Action Items.
#[utoipa::path(
    delete,
    path = "/transcripts/{id}",
    params(
        ("id" = i32, Path, description = "Transcript id to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted the Transcript and its Action Items"),
        (status = 404, description = "Transcript not found"),
    ),
    tag = "transcripts"
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Transcript by id: {id}");

    TranscriptApi::delete_by_id(app_state.db_conn_ref(), id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Transcript deleted successfully" })),
    ))
}
