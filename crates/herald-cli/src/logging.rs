//! Tracing subscriber setup

use anyhow::{Context, Result};
use herald_core::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .context("invalid log filter")?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        "compact" => builder.compact().try_init(),
        _ => builder.pretty().try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
}
