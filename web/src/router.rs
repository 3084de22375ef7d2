use crate::controller::{
    action_item_controller, health_check_controller, root_controller, transcript_controller,
};
use crate::{params, AppState};
use axum::{
    routing::{get, patch},
    Router,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Meeting Action Items Tracker API",
            description = "Extracts action items from meeting transcripts and tracks them"
        ),
        paths(
            root_controller::index,
            health_check_controller::health_check,
            transcript_controller::index,
            transcript_controller::read,
            transcript_controller::create,
            transcript_controller::delete,
            action_item_controller::index,
            action_item_controller::read,
            action_item_controller::create,
            action_item_controller::update,
            action_item_controller::complete,
            action_item_controller::delete,
        ),
        components(
            schemas(
                domain::action_items::Model,
                domain::transcripts::Model,
                domain::action_item_status::ActionItemStatus,
                domain::transcript::TranscriptWithActionItems,
                domain::health::HealthReport,
                domain::health::HealthStatus,
                params::transcript::CreateParams,
                params::action_item::CreateParams,
                params::action_item::UpdateParams,
            )
        ),
        tags(
            (name = "meeting_tracker", description = "Meeting Action Items Tracker API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(root_routes())
        .merge(health_routes(app_state.clone()))
        .merge(transcript_routes(app_state.clone()))
        .merge(action_item_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/docs"))
}

fn root_routes() -> Router {
    Router::new().route("/", get(root_controller::index))
}

fn health_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check_controller::health_check))
        .route("/health/", get(health_check_controller::health_check))
        .with_state(app_state)
}

fn transcript_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/transcripts",
            get(transcript_controller::index).post(transcript_controller::create),
        )
        .route(
            "/transcripts/",
            get(transcript_controller::index).post(transcript_controller::create),
        )
        .route(
            "/transcripts/{id}",
            get(transcript_controller::read).delete(transcript_controller::delete),
        )
        .with_state(app_state)
}

fn action_item_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/action-items",
            get(action_item_controller::index).post(action_item_controller::create),
        )
        .route(
            "/action-items/",
            get(action_item_controller::index).post(action_item_controller::create),
        )
        .route(
            "/action-items/{id}",
            get(action_item_controller::read)
                .put(action_item_controller::update)
                .delete(action_item_controller::delete),
        )
        .route(
            "/action-items/{id}/complete",
            patch(action_item_controller::complete),
        )
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{app_state, FakeProvider};
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use sea_orm::ConnectionTrait;
    use serde_json::{json, Value};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use tower::ServiceExt;

    const EXTRACTED: &str = r#"Sure! Here are the action items:
```json
[
  {"task": "Send the Q3 budget draft", "owner": "Bob", "due_date": "Friday", "tags": "finance"},
  {"task": "Book the offsite venue", "owner": "Carol", "due_date": null, "tags": ["events", "offsite"]}
]
```"#;

    async fn app_with(provider: FakeProvider) -> (Router, Arc<FakeProvider>) {
        let provider = Arc::new(provider);
        let app = define_routes(app_state(provider.clone()).await);
        (app, provider)
    }

    async fn app() -> Router {
        app_with(FakeProvider::new(EXTRACTED)).await.0
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }

    async fn create_transcript(app: &Router, title: &str) -> Value {
        let (status, transcript) = send(
            app,
            Method::POST,
            "/transcripts/",
            Some(json!({
                "title": title,
                "content": "Alice: Bob, please send the Q3 budget draft by Friday. Carol will book the offsite venue."
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        transcript
    }

    async fn create_action_item(app: &Router, body: Value) -> Value {
        let (status, action_item) = send(app, Method::POST, "/action-items/", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        action_item
    }

    fn ids(items: &Value) -> Vec<i64> {
        let mut ids: Vec<i64> = items
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_i64().unwrap())
            .collect();
        ids.sort();
        ids
    }

    #[tokio::test]
    async fn creating_a_transcript_stores_extracted_action_items() {
        let app = app().await;

        let transcript = create_transcript(&app, "Weekly sync").await;
        let transcript_id = transcript["id"].as_i64().unwrap();
        let action_items = transcript["action_items"].as_array().unwrap();

        assert_eq!(transcript["title"], "Weekly sync");
        assert!(!transcript["processed_at"].is_null());
        assert_eq!(action_items.len(), 2);
        for action_item in action_items {
            assert!(!action_item["task"].as_str().unwrap().is_empty());
            assert_eq!(action_item["transcript_id"].as_i64(), Some(transcript_id));
            assert_eq!(action_item["status"], "pending");
            assert!(action_item["updated_at"].is_null());
        }
        assert_eq!(action_items[0]["owner"], "Bob");
        assert_eq!(action_items[1]["tags"], "events, offsite");

        let (status, fetched) =
            send(&app, Method::GET, &format!("/transcripts/{transcript_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["title"], transcript["title"]);
        assert_eq!(ids(&fetched["action_items"]), ids(&transcript["action_items"]));
    }

    #[tokio::test]
    async fn unreachable_llm_still_stores_the_transcript() {
        let (app, _provider) = app_with(FakeProvider::unreachable()).await;

        let transcript = create_transcript(&app, "Quiet meeting").await;

        assert!(transcript["action_items"].as_array().unwrap().is_empty());
        assert!(!transcript["processed_at"].is_null());
    }

    #[tokio::test]
    async fn failed_action_item_insert_rolls_back_the_transcript() {
        let state = app_state(Arc::new(FakeProvider::new(EXTRACTED))).await;
        state
            .db_conn_ref()
            .execute_unprepared(
                "CREATE TRIGGER reject_action_items BEFORE INSERT ON action_items \
                 BEGIN SELECT RAISE(ABORT, 'action items are read only'); END;",
            )
            .await
            .unwrap();
        let app = define_routes(state);

        let (status, body) = send(
            &app,
            Method::POST,
            "/transcripts/",
            Some(json!({ "title": "Doomed", "content": "Bob will send the deck." })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Error processing transcript: "), "{detail}");
        assert!(detail.contains("action items are read only"), "{detail}");

        let (status, transcripts) = send(&app, Method::GET, "/transcripts/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(transcripts, json!([]));
    }

    #[tokio::test]
    async fn create_transcript_requires_title_and_content() {
        let app = app().await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/transcripts",
            Some(json!({ "title": "No content" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn listing_transcripts_is_newest_first_and_limited() {
        let app = app().await;
        for n in 1..=6 {
            create_transcript(&app, &format!("Meeting {n}")).await;
        }

        let (status, recent) = send(&app, Method::GET, "/transcripts/", None).await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = recent
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap())
            .collect();
        assert_eq!(
            titles,
            vec!["Meeting 6", "Meeting 5", "Meeting 4", "Meeting 3", "Meeting 2"]
        );
        assert_eq!(recent[0]["action_items"].as_array().unwrap().len(), 2);

        let (_, two) = send(&app, Method::GET, "/transcripts?limit=2", None).await;
        assert_eq!(two.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn deleting_a_transcript_removes_its_action_items() {
        let app = app().await;
        let transcript = create_transcript(&app, "To be deleted").await;
        let transcript_id = transcript["id"].as_i64().unwrap();
        let kept = create_transcript(&app, "Kept").await;

        let (status, body) =
            send(&app, Method::DELETE, &format!("/transcripts/{transcript_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Transcript deleted successfully" }));

        let (_, orphans) = send(
            &app,
            Method::GET,
            &format!("/action-items/?transcript_id={transcript_id}"),
            None,
        )
        .await;
        assert_eq!(orphans, json!([]));

        let (_, all) = send(&app, Method::GET, "/action-items/", None).await;
        assert_eq!(ids(&all), ids(&kept["action_items"]));

        let (status, body) =
            send(&app, Method::GET, &format!("/transcripts/{transcript_id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Transcript not found" }));

        let (status, _) =
            send(&app, Method::DELETE, &format!("/transcripts/{transcript_id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_records_return_404() {
        let app = app().await;

        let (status, body) = send(&app, Method::GET, "/action-items/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Action item not found" }));

        let (status, body) = send(&app, Method::GET, "/transcripts/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Transcript not found" }));

        for (method, uri) in [
            (Method::DELETE, "/action-items/999"),
            (Method::PATCH, "/action-items/999/complete"),
        ] {
            let (status, _) = send(&app, method, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
        }

        let (status, _) = send(
            &app,
            Method::PUT,
            "/action-items/999",
            Some(json!({ "owner": "Alice" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn creating_an_action_item_requires_an_existing_transcript() {
        let app = app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/action-items",
            Some(json!({ "task": "Orphan", "transcript_id": 42 })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Transcript not found" }));
    }

    #[tokio::test]
    async fn mark_complete_is_idempotent() {
        let app = app().await;
        let transcript = create_transcript(&app, "Sync").await;
        let id = transcript["action_items"][0]["id"].as_i64().unwrap();
        let uri = format!("/action-items/{id}/complete");

        let (status, first) = send(&app, Method::PATCH, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["status"], "completed");
        assert!(!first["updated_at"].is_null());

        let (status, second) = send(&app, Method::PATCH, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["status"], "completed");
    }

    #[tokio::test]
    async fn filters_are_independent_and_combinable() {
        let app = app().await;
        let first = create_transcript(&app, "First").await;
        let second = create_transcript(&app, "Second").await;
        let first_id = first["id"].as_i64().unwrap();
        let second_id = second["id"].as_i64().unwrap();

        let completed_id = first["action_items"][0]["id"].as_i64().unwrap();
        send(
            &app,
            Method::PATCH,
            &format!("/action-items/{completed_id}/complete"),
            None,
        )
        .await;
        let extra = create_action_item(
            &app,
            json!({ "task": "Already done", "status": "completed", "transcript_id": second_id }),
        )
        .await;

        let (_, all) = send(&app, Method::GET, "/action-items/", None).await;
        assert_eq!(all.as_array().unwrap().len(), 5);

        let (_, pending) = send(&app, Method::GET, "/action-items/?status=pending", None).await;
        assert_eq!(pending.as_array().unwrap().len(), 3);
        assert!(pending
            .as_array()
            .unwrap()
            .iter()
            .all(|item| item["status"] == "pending"));

        let (_, owned) = send(
            &app,
            Method::GET,
            &format!("/action-items/?transcript_id={first_id}"),
            None,
        )
        .await;
        assert_eq!(ids(&owned), ids(&first["action_items"]));

        let (_, both) = send(
            &app,
            Method::GET,
            &format!("/action-items/?transcript_id={second_id}&status=completed"),
            None,
        )
        .await;
        assert_eq!(ids(&both), vec![extra["id"].as_i64().unwrap()]);

        let (status, empty_values) =
            send(&app, Method::GET, "/action-items/?transcript_id=&status=", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(empty_values.as_array().unwrap().len(), 5);

        let (status, _) = send(&app, Method::GET, "/action-items/?status=archived", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn partial_update_only_touches_supplied_fields() {
        let app = app().await;
        let transcript = create_transcript(&app, "Sync").await;
        let original = transcript["action_items"][0].clone();
        let uri = format!("/action-items/{}", original["id"]);

        let (status, updated) =
            send(&app, Method::PUT, &uri, Some(json!({ "owner": "Alice" }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["owner"], "Alice");
        assert!(!updated["updated_at"].is_null());
        for field in ["task", "status", "due_date", "tags", "transcript_id"] {
            assert_eq!(updated[field], original[field], "{field} changed");
        }

        let (_, cleared) = send(&app, Method::PUT, &uri, Some(json!({ "due_date": null }))).await;
        assert!(cleared["due_date"].is_null());
        assert_eq!(cleared["owner"], "Alice");
    }

    #[tokio::test]
    async fn empty_update_is_a_no_op() {
        let app = app().await;
        let transcript = create_transcript(&app, "Sync").await;
        let original = transcript["action_items"][0].clone();

        let (status, unchanged) = send(
            &app,
            Method::PUT,
            &format!("/action-items/{}", original["id"]),
            Some(json!({})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        for field in ["id", "task", "owner", "status", "due_date", "tags", "transcript_id"] {
            assert_eq!(unchanged[field], original[field], "{field} changed");
        }
        assert!(unchanged["updated_at"].is_null());
    }

    #[tokio::test]
    async fn deleting_an_action_item() {
        let app = app().await;
        let transcript = create_transcript(&app, "Sync").await;
        let id = transcript["action_items"][0]["id"].as_i64().unwrap();

        let (status, body) =
            send(&app, Method::DELETE, &format!("/action-items/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Action item deleted successfully" }));

        let (status, _) = send(&app, Method::GET, &format!("/action-items/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_check_probes_the_llm_once_per_window() {
        let (app, provider) = app_with(FakeProvider::new(EXTRACTED)).await;

        let (status, first) = send(&app, Method::GET, "/health/", None).await;
        let (_, second) = send(&app, Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["status"], "healthy");
        assert_eq!(first["database"], "healthy");
        assert_eq!(first["llm_service"], "healthy");
        assert!(first["timestamp"].is_string());
        assert_eq!(second["llm_service"], "healthy");
        assert_eq!(provider.count_tokens_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn root_banner_and_openapi_document() {
        let app = app().await;

        let (status, banner) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(banner["message"], "Meeting Action Items Tracker API");
        assert_eq!(banner["docs"], "/docs");
        assert_eq!(banner["health"], "/health");

        let (status, openapi) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(openapi["paths"]["/action-items/{id}/complete"].is_object());
        assert!(openapi["paths"]["/transcripts/"].is_object());
    }
}
