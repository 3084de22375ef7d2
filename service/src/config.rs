use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

/// Default Gemini REST API base URL used when `GEMINI_BASE_URL` is not set.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model used for action item extraction.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Sets the database URL to connect to. Defaults to a local single-file SQLite store.
    #[arg(
        short,
        long,
        env,
        default_value = "sqlite://meetingtracker.db?mode=rwc"
    )]
    database_url: Option<String>,

    /// Maximum number of database connections in the pool
    #[arg(long, env, default_value_t = 10)]
    pub db_max_connections: u32,

    /// Minimum number of idle database connections to maintain
    #[arg(long, env, default_value_t = 1)]
    pub db_min_connections: u32,

    /// Timeout in seconds for establishing a new database connection
    #[arg(long, env, default_value_t = 8)]
    pub db_connect_timeout_secs: u64,

    /// Timeout in seconds for acquiring a connection from the pool
    #[arg(long, env, default_value_t = 8)]
    pub db_acquire_timeout_secs: u64,

    /// Seconds before an idle connection is closed
    #[arg(long, env, default_value_t = 600)]
    pub db_idle_timeout_secs: u64,

    /// Maximum lifetime in seconds for any connection in the pool
    #[arg(long, env, default_value_t = 1800)]
    pub db_max_lifetime_secs: u64,

    /// The API key to use when calling the Google Gemini API.
    #[arg(long, env)]
    google_api_key: Option<String>,

    /// The Gemini model used to extract action items.
    #[arg(long, env, default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,

    /// The base URL of the Gemini REST API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_GEMINI_BASE_URL)]
    gemini_base_url: String,

    /// Seconds before an outbound Gemini request is abandoned
    #[arg(long, env, default_value_t = 120)]
    pub gemini_timeout_secs: u64,

    /// Seconds a Gemini reachability probe result is reused by the health check
    #[arg(long, env, default_value_t = 120)]
    pub llm_health_cache_secs: u64,

    /// Total number of extraction attempts when the LLM reports rate limiting
    #[arg(long, env, default_value_t = 3)]
    pub extraction_max_attempts: u32,

    /// Base backoff in seconds between rate limited extraction attempts.
    /// The n-th retry waits n times this value.
    #[arg(long, env, default_value_t = 30)]
    pub extraction_backoff_secs: u64,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "0.0.0.0")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 8000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn set_database_url(mut self, database_url: String) -> Self {
        self.database_url = Some(database_url);
        self
    }

    pub fn database_url(&self) -> &str {
        self.database_url
            .as_ref()
            .expect("No Database URL provided")
    }

    /// Returns the Gemini API key, if configured.
    pub fn google_api_key(&self) -> Option<String> {
        self.google_api_key.clone()
    }

    pub fn set_google_api_key(mut self, api_key: Option<String>) -> Self {
        self.google_api_key = api_key;
        self
    }

    pub fn gemini_model(&self) -> &str {
        &self.gemini_model
    }

    /// Returns the Gemini API base URL.
    pub fn gemini_base_url(&self) -> &str {
        &self.gemini_base_url
    }

    pub fn set_gemini_base_url(mut self, base_url: String) -> Self {
        self.gemini_base_url = base_url;
        self
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["meeting_tracker"];
        argv.extend_from_slice(args);
        Config::parse_from(argv)
    }

    #[test]
    fn rust_env_parses_case_insensitively() {
        assert_eq!("PRODUCTION".parse::<RustEnv>(), Ok(RustEnv::Production));
        assert_eq!("staging".parse::<RustEnv>(), Ok(RustEnv::Staging));
        assert_eq!("nope".parse::<RustEnv>(), Err(RustEnvParseError));
    }

    #[test]
    fn extraction_and_health_flags_override_defaults() {
        let config = parse(&[
            "--extraction-max-attempts",
            "5",
            "--extraction-backoff-secs",
            "2",
            "--llm-health-cache-secs",
            "10",
        ]);

        assert_eq!(config.extraction_max_attempts, 5);
        assert_eq!(config.extraction_backoff_secs, 2);
        assert_eq!(config.llm_health_cache_secs, 10);
        assert_eq!(config.gemini_timeout_secs, 120);
    }

    #[test]
    fn allowed_origins_are_comma_delimited() {
        let config = parse(&[
            "--allowed-origins",
            "http://localhost:3000,https://tracker.example.com",
        ]);

        assert_eq!(
            config.allowed_origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://tracker.example.com".to_string()
            ]
        );
    }

    #[test]
    fn setters_override_database_url_and_gemini_settings() {
        let config = parse(&[])
            .set_database_url("sqlite::memory:".to_string())
            .set_google_api_key(Some("key".to_string()))
            .set_gemini_base_url("http://127.0.0.1:1234".to_string());

        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.google_api_key(), Some("key".to_string()));
        assert_eq!(config.gemini_base_url(), "http://127.0.0.1:1234");
    }
}
