use config::Config;
use log::*;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::sync::Arc;
use tokio::time::Duration;

pub mod config;
pub mod logging;

/// Connects the pool described by `config`. Migrations are not applied here.
pub async fn init_database(config: &Config) -> Result<DatabaseConnection, DbErr> {
    Database::connect(connect_options(config)).await
}

fn is_in_memory_sqlite(database_url: &str) -> bool {
    database_url.starts_with("sqlite:") && database_url.contains(":memory:")
}

fn connect_options(config: &Config) -> ConnectOptions {
    let database_url = config.database_url();
    let mut opt = ConnectOptions::new(database_url);
    opt.connect_timeout(Duration::from_secs(config.db_connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Info);

    // Every in-memory SQLite connection opens its own empty database, so the pool
    // is pinned to a single connection.
    if is_in_memory_sqlite(database_url) {
        info!("Using a single connection for in-memory SQLite database {database_url}");
        opt.max_connections(1).min_connections(1);
        return opt;
    }

    info!(
        "Database pool config: max_connections={}, min_connections={}, \
         connect_timeout={}s, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
        config.db_max_connections,
        config.db_min_connections,
        config.db_connect_timeout_secs,
        config.db_acquire_timeout_secs,
        config.db_idle_timeout_secs,
        config.db_max_lifetime_secs,
    );

    opt.max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .idle_timeout(Duration::from_secs(config.db_idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime_secs));
    opt
}

/// Infrastructure shared by every request: the pool and the parsed configuration.
#[derive(Clone)]
pub struct AppState {
    pub database_connection: Arc<DatabaseConnection>,
    pub config: Config,
}

impl AppState {
    pub fn new(app_config: Config, db: &Arc<DatabaseConnection>) -> Self {
        Self {
            database_connection: Arc::clone(db),
            config: app_config,
        }
    }

    pub fn db_conn_ref(&self) -> &DatabaseConnection {
        self.database_connection.as_ref()
    }
}
