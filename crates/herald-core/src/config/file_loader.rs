//! File-based configuration loading

use super::model::DispatchConfig;
use crate::error::{DispatchError, DispatchResult};
use std::fs;
use std::path::Path;

/// Load configuration from a file
///
/// TOML for `.toml` files, JSON otherwise. Returns the default config if the
/// file doesn't exist.
pub fn load_from_file(path: &Path) -> DispatchResult<DispatchConfig> {
    if !path.exists() {
        return Ok(DispatchConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        DispatchError::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config: DispatchConfig = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| {
            DispatchError::config(format!(
                "Failed to parse TOML config '{}': {}",
                path.display(),
                e
            ))
        })?,
        _ => serde_json::from_str(&content).map_err(|e| {
            DispatchError::config(format!(
                "Failed to parse JSON config '{}': {}",
                path.display(),
                e
            ))
        })?,
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_from_file(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, DispatchConfig::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("herald.toml");
        fs::write(
            &path,
            r#"
max_concurrent_dispatches = 2
debug = true

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.max_concurrent_dispatches, 2);
        assert!(config.debug);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.event_channel_capacity, 256);
    }

    #[test]
    fn test_load_from_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("herald.json");
        fs::write(&path, r#"{"event_channel_capacity": 32}"#).unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.event_channel_capacity, 32);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("herald.toml");
        fs::write(&path, "max_concurrent_dispatches = 0").unwrap();
        assert!(matches!(load_from_file(&path), Err(DispatchError::Config(_))));

        fs::write(&path, "max_concurrent_dispatches = [").unwrap();
        assert!(matches!(load_from_file(&path), Err(DispatchError::Config(_))));
    }
}
