use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::AppState;
use domain::health::{self, HealthReport};

/// GET the combined health of the database and the LLM service
#[utoipa::path(
    get,
    path = "/health/",
    responses(
        (status = 200, description = "Health of the service and its dependencies", body = HealthReport),
    ),
    tag = "health"
)]
pub async fn health_check(State(app_state): State<AppState>) -> impl IntoResponse {
    let extractor = app_state.extractor();
    let report = health::check(
        app_state.db_conn_ref(),
        extractor.provider().as_ref(),
        app_state.health_cache(),
    )
    .await;

    Json(report)
}
