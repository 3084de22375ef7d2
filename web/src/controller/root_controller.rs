use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// GET a short description of the service and where to look next
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner"),
    ),
    tag = "meeting_tracker"
)]
pub async fn index() -> impl IntoResponse {
    Json(json!({
        "message": "Meeting Action Items Tracker API",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/docs",
        "health": "/health",
    }))
}
