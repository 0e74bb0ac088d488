//! Logging setup
//!
//! Installs the global tracing subscriber. `RUST_LOG` takes precedence over
//! the configured level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize the global subscriber from logging configuration
pub fn init(config: &LoggingConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));
    let json = config.format.eq_ignore_ascii_case("json");

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer()))
        .try_init()
}

/// Filter directive covering the library and the CLI binary
pub fn filter_directive(config: &LoggingConfig) -> String {
    format!(
        "pasture_dashboard={level},pasture={level}",
        level = config.level
    )
}
