use axum::http::{header, HeaderValue, Method};
use domain::extraction::Extractor;
use domain::health::HealthCache;
use domain::llm::CompletionProvider;
use log::*;
use sea_orm::DatabaseConnection;
use service::config::Config;
use std::sync::Arc;
use tokio::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

mod controller;
mod error;
mod params;
pub mod router;

pub use error::Error;

/// Everything a request handler needs. Cloned into every handler, so all
/// members are cheap reference counted handles.
#[derive(Clone)]
pub struct AppState {
    service_state: service::AppState,
    extractor: Arc<Extractor>,
    health_cache: Arc<HealthCache>,
}

impl AppState {
    pub fn new(
        config: Config,
        db: &Arc<DatabaseConnection>,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        let extractor = Extractor::from_config(provider, &config);
        let health_cache = HealthCache::new(Duration::from_secs(config.llm_health_cache_secs));

        Self {
            service_state: service::AppState::new(config, db),
            extractor: Arc::new(extractor),
            health_cache: Arc::new(health_cache),
        }
    }

    pub fn db_conn_ref(&self) -> &DatabaseConnection {
        self.service_state.db_conn_ref()
    }

    pub fn config(&self) -> &Config {
        &self.service_state.config
    }

    pub(crate) fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    pub(crate) fn health_cache(&self) -> &HealthCache {
        &self.health_cache
    }
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let config = app_state.config();
    let interface = config.interface.as_deref().unwrap_or("0.0.0.0");
    let host = format!("{interface}:{}", config.port);
    let cors_layer = cors_layer(&config.allowed_origins);

    info!("Server starting... listening for connections on http://{host}");

    let listener = tokio::net::TcpListener::bind(&host).await?;
    let router = router::define_routes(app_state).layer(cors_layer);

    axum::serve(listener, router).await
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = parse_origins(allowed_origins);

    info!("CORS allowed origins: {allowed_origins:?}");

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
}

fn parse_origins(allowed_origins: &[String]) -> Vec<HeaderValue> {
    allowed_origins
        .iter()
        .filter_map(|origin| match origin.trim().parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {origin}: {e}");
                None
            }
        })
        .collect()
}
