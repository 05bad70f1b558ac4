// 📝 Logging - tracing subscriber for the command line tool
//
// RUST_LOG overrides the default level (e.g. RUST_LOG=stock_registry=debug
// also shows EPS values that fell back to zero).

use anyhow::{anyhow, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging() -> Result<()> {
    init_logging_with_level(DEFAULT_LOG_LEVEL)
}

pub fn init_logging_with_level(default_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).compact())
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
