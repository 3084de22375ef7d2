use crate::llm::CompletionProvider;
use chrono::{DateTime, Utc};
use log::*;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::future::Future;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};
use utoipa::ToSchema;

const PROBE_TEXT: &str = "health check";
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl From<bool> for HealthStatus {
    fn from(healthy: bool) -> Self {
        if healthy {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        }
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub database: HealthStatus,
    pub llm_service: HealthStatus,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug)]
struct ProbeResult {
    last_check_time: Instant,
    last_result: bool,
}

/// Remembers the last LLM reachability probe for `window` so frequent health
/// polling does not spend quota on the external API.
///
/// The lock only guards reading and storing the result. Callers that find the
/// result stale at the same moment each probe, and the last one to finish is kept.
#[derive(Debug)]
pub struct HealthCache {
    window: Duration,
    last: Mutex<Option<ProbeResult>>,
}

impl HealthCache {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: Mutex::new(None),
        }
    }

    /// Returns the cached result, running `probe` first if there is none yet or
    /// it is older than the window. Failed probes are cached like successful ones.
    pub async fn refresh_if_stale<F, Fut>(&self, probe: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        if let Some(cached) = *self.last.lock().await {
            if cached.last_check_time.elapsed() < self.window {
                return cached.last_result;
            }
        }

        let last_result = probe().await;
        *self.last.lock().await = Some(ProbeResult {
            last_check_time: Instant::now(),
            last_result,
        });

        last_result
    }
}

async fn probe_llm(provider: &dyn CompletionProvider) -> bool {
    match tokio::time::timeout(PROBE_TIMEOUT, provider.count_tokens(PROBE_TEXT)).await {
        Ok(Ok(total_tokens)) => total_tokens > 0,
        Ok(Err(e)) => {
            warn!("LLM health probe failed: {e}");
            false
        }
        Err(_) => {
            warn!("LLM health probe timed out after {PROBE_TIMEOUT:?}");
            false
        }
    }
}

/// Checks the database and, through `cache`, the LLM service.
pub async fn check(
    db: &DatabaseConnection,
    provider: &dyn CompletionProvider,
    cache: &HealthCache,
) -> HealthReport {
    let database = match entity_api::ping(db).await {
        Ok(()) => true,
        Err(e) => {
            error!("Database health probe failed: {e}");
            false
        }
    };

    let llm_service = cache.refresh_if_stale(|| probe_llm(provider)).await;

    HealthReport {
        status: (database && llm_service).into(),
        database: database.into(),
        llm_service: llm_service.into(),
        timestamp: Utc::now(),
    }
}
