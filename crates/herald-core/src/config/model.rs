//! Configuration model

use crate::error::{DispatchError, DispatchResult};
use crate::grouping::DEFAULT_GROUP_LIMIT;
use serde::{Deserialize, Serialize};

/// Dispatcher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Worker pool size: how many dispatch units may run at once
    pub max_concurrent_dispatches: usize,
    /// Emit the per-notification timing line
    pub debug: bool,
    /// Buffer size of the lifecycle event bus
    pub event_channel_capacity: usize,
    /// Groups tracked before idle group bookkeeping is pruned
    pub max_tracked_groups: usize,
    pub logging: LoggingConfig,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_dispatches: 4,
            debug: false,
            event_channel_capacity: 256,
            max_tracked_groups: DEFAULT_GROUP_LIMIT,
            logging: LoggingConfig::default(),
        }
    }
}

impl DispatchConfig {
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_max_concurrent_dispatches(mut self, max: usize) -> Self {
        self.max_concurrent_dispatches = max;
        self
    }

    pub fn validate(&self) -> DispatchResult<()> {
        if self.max_concurrent_dispatches == 0 {
            return Err(DispatchError::config(
                "max_concurrent_dispatches must be greater than zero",
            ));
        }
        if self.event_channel_capacity == 0 {
            return Err(DispatchError::config(
                "event_channel_capacity must be greater than zero",
            ));
        }
        if self.max_tracked_groups == 0 {
            return Err(DispatchError::config(
                "max_tracked_groups must be greater than zero",
            ));
        }
        self.logging.validate()
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    const LEVELS: [&'static str; 5] = ["trace", "debug", "info", "warn", "error"];
    const FORMATS: [&'static str; 3] = ["json", "pretty", "compact"];

    pub fn validate(&self) -> DispatchResult<()> {
        if !Self::LEVELS.contains(&self.level.as_str()) {
            return Err(DispatchError::config(format!(
                "Unknown log level '{}'",
                self.level
            )));
        }
        if !Self::FORMATS.contains(&self.format.as_str()) {
            return Err(DispatchError::config(format!(
                "Unknown log format '{}'",
                self.format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DispatchConfig::default();
        assert_eq!(config.max_concurrent_dispatches, 4);
        assert!(!config.debug);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let config = DispatchConfig::default().with_max_concurrent_dispatches(0);
        assert!(matches!(config.validate(), Err(DispatchError::Config(_))));
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let mut config = DispatchConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_tracked_groups_is_rejected() {
        let config = DispatchConfig {
            max_tracked_groups: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DispatchError::Config(_))));
    }
}
