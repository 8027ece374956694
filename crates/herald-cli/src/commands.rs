//! Command execution

use crate::args::{Cli, Commands};
use crate::console::{ConsoleBuilder, ConsoleSurface};
use anyhow::{Context, Result};
use herald_core::config::{apply_overrides, load_from_file};
use herald_core::events::drain;
use herald_core::{
    DispatchConfig, EventBus, HostContext, NotificationDispatcher, NotificationRequest,
    SharedLifecycleTracker,
};
use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Config file, then `HERALD_*` variables, then command line flags
pub fn load_config(cli: &Cli) -> Result<DispatchConfig> {
    load_config_with(cli, |name| env::var(name).ok())
}

fn load_config_with(cli: &Cli, lookup: impl Fn(&str) -> Option<String>) -> Result<DispatchConfig> {
    let base = match &cli.config {
        Some(path) => load_from_file(path)?,
        None => DispatchConfig::default(),
    };
    let mut config = apply_overrides(base, lookup)?;
    if cli.debug {
        config.debug = true;
    }
    Ok(config)
}

pub async fn run(cli: Cli, config: DispatchConfig) -> Result<()> {
    let host = Arc::new(HostContext::new("herald-cli").with_grouping(!cli.no_grouping));
    let bus = Arc::new(EventBus::new(config.event_channel_capacity));
    let mut events = bus.subscribe();

    let dispatcher = NotificationDispatcher::builder(config)
        .context(&host)
        .presentation_builder(Arc::new(ConsoleBuilder))
        .surface(Arc::new(ConsoleSurface::default()))
        .lifecycle_tracker(Arc::new(SharedLifecycleTracker::new(cli.state)))
        .event_sink(bus.clone())
        .build()?;

    let requests = match cli.command {
        Commands::Send {
            id,
            channel,
            title,
            body,
            group,
            layout,
            big_picture,
            hide_in_foreground,
            hide_in_background,
        } => {
            let mut request = NotificationRequest::new(id, channel)
                .with_layout(layout)
                .with_display(!hide_in_foreground, !hide_in_background);
            request.title = title;
            request.body = body;
            request.group_key = group;
            request.big_picture = big_picture;
            vec![request]
        }
        Commands::Replay { file } => read_requests(&file)?,
    };

    let handles = requests
        .into_iter()
        .map(|request| dispatcher.submit(Some(request), cli.state))
        .collect::<Result<Vec<_>, _>>()?;

    for handle in handles {
        let outcome = handle.outcome().await?;
        if let Some(error) = &outcome.error {
            eprintln!("notification #{} failed: {}", outcome.notification_id, error);
        }
    }

    for event in drain(&mut events) {
        println!("[{}] #{}", event.event_type(), event.notification().id);
    }

    let stats = dispatcher.stats();
    info!(
        submitted = stats.submitted,
        displayed = stats.displayed,
        failed = stats.failed,
        summaries = stats.summaries,
        "Dispatch finished"
    );
    Ok(())
}

/// Read a JSON array of requests
fn read_requests(path: &Path) -> Result<Vec<NotificationRequest>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("'{}' is not a JSON array of notifications", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_requests() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("batch.json");
        fs::write(
            &path,
            r#"[
                {"id": 1, "title": "one", "group_key": "g"},
                {"id": 2, "body": "two", "display_on_background": false}
            ]"#,
        )
        .unwrap();

        let requests = read_requests(&path).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].group(), Some("g"));
        assert!(!requests[1].display_on_background);
    }

    #[test]
    fn test_read_requests_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("batch.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(read_requests(&path).is_err());
        assert!(read_requests(&temp_dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_debug_flag_overrides_config() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("absent.toml");
        let cli = <Cli as clap::Parser>::try_parse_from([
            "herald",
            "--config",
            missing.to_str().unwrap(),
            "--debug",
            "replay",
            "x.json",
        ])
        .unwrap();
        let config = load_config_with(&cli, |name: &str| {
            (name == "HERALD_DEBUG").then(|| "off".to_string())
        })
        .unwrap();
        assert!(config.debug);
    }

    #[test]
    fn test_env_layer_applies_over_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("herald.toml");
        fs::write(&path, "max_concurrent_dispatches = 2\n").unwrap();
        let cli = <Cli as clap::Parser>::try_parse_from([
            "herald",
            "--config",
            path.to_str().unwrap(),
            "replay",
            "x.json",
        ])
        .unwrap();

        let config = load_config_with(&cli, |name: &str| {
            (name == "HERALD_MAX_CONCURRENT_DISPATCHES").then(|| "6".to_string())
        })
        .unwrap();
        assert_eq!(config.max_concurrent_dispatches, 6);
        assert!(!config.debug);
    }
}
