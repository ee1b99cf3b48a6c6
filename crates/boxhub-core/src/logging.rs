//! Tracing subscriber initialization.
//!
//! BoxHub is a library workspace; the embedding process (API server, test
//! harness, migration job) calls [`init_logging`] once at startup.

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Build the env filter for the subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_from_level(&config.level))
}

/// Initialize the global tracing subscriber from configuration.
pub fn init_logging(config: &LoggingConfig) {
    let filter = build_env_filter(config);

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

fn filter_from_level(level: &str) -> EnvFilter {
    EnvFilter::new(level)
}
