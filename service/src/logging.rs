use crate::config::{Config, RustEnv};
use log::LevelFilter;
use simplelog::{self, ColorChoice, ConfigBuilder, SharedLogger, TermLogger, TerminalMode};

/// Dependency modules whose output is hidden unless the level is `TRACE`.
const FILTERED_MODULES: &[&str] = &[
    "sqlx", "sea_orm", "tower", "tracing", "hyper", "axum", "reqwest", "rustls",
];

pub struct Logger {}

impl Logger {
    /// Installs the global terminal logger described by `config`.
    ///
    /// Dependency chatter is filtered out below `TRACE`, and colors are turned
    /// off in production where output usually lands in a log collector.
    pub fn init_logger(config: &Config) {
        if let Err(e) = simplelog::CombinedLogger::init(vec![Self::term_logger(config)]) {
            eprintln!("Logger already initialized: {e}");
        }
    }

    fn term_logger(config: &Config) -> Box<dyn SharedLogger> {
        let level = config.log_level_filter;
        TermLogger::new(
            level,
            Self::build_log_config(Self::ignored_modules(level)),
            TerminalMode::Mixed,
            Self::color_choice(&config.runtime_env),
        )
    }

    fn color_choice(runtime_env: &RustEnv) -> ColorChoice {
        match runtime_env {
            RustEnv::Production => ColorChoice::Never,
            RustEnv::Development | RustEnv::Staging => ColorChoice::Auto,
        }
    }

    fn ignored_modules(level: LevelFilter) -> &'static [&'static str] {
        if level == LevelFilter::Trace {
            &[]
        } else {
            FILTERED_MODULES
        }
    }

    fn build_log_config(ignored_modules: &[&'static str]) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();

        for &module in ignored_modules {
            builder.add_filter_ignore_str(module);
        }

        builder.build()
    }
}
