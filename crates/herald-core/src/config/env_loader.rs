//! Environment variable-based configuration loading

use super::model::DispatchConfig;
use crate::error::{DispatchError, DispatchResult};
use std::env;

const DEBUG_VAR: &str = "HERALD_DEBUG";
const MAX_CONCURRENT_VAR: &str = "HERALD_MAX_CONCURRENT_DISPATCHES";
const LOG_LEVEL_VAR: &str = "HERALD_LOG_LEVEL";

/// Load configuration from `HERALD_*` environment variables over the defaults
pub fn load_from_env() -> DispatchResult<DispatchConfig> {
    apply_env_overrides(DispatchConfig::default())
}

/// Overlay `HERALD_*` environment variables on `config`
pub fn apply_env_overrides(config: DispatchConfig) -> DispatchResult<DispatchConfig> {
    apply_overrides(config, |name| env::var(name).ok())
}

/// Overlay `HERALD_*` values resolved through `lookup` on `config`
pub fn apply_overrides(
    mut config: DispatchConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> DispatchResult<DispatchConfig> {
    if let Some(debug) = lookup(DEBUG_VAR) {
        config.debug = match debug.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            other => {
                return Err(DispatchError::config(format!(
                    "Invalid {} value '{}'",
                    DEBUG_VAR, other
                )));
            }
        };
    }

    if let Some(max) = lookup(MAX_CONCURRENT_VAR) {
        config.max_concurrent_dispatches = max
            .trim()
            .parse()
            .map_err(|_| DispatchError::config(format!("Invalid {} value", MAX_CONCURRENT_VAR)))?;
    }

    if let Some(level) = lookup(LOG_LEVEL_VAR) {
        config.logging.level = level.trim().to_ascii_lowercase();
    }

    config.validate()?;
    Ok(config)
}
