//! Tracing subscriber initialization.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::logging::LoggingConfig;

/// Initialize the global tracing subscriber from logging configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt().with_env_filter(filter).json().init();
        }
        _ => {
            fmt().with_env_filter(filter).pretty().init();
        }
    }
}
