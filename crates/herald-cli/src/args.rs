//! Command line arguments

use clap::{Parser, Subcommand};
use herald_core::{AppLifecycleState, NotificationLayout};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "herald", version, about = "Dispatch notifications through the Herald pipeline")]
pub struct Cli {
    /// Configuration file (TOML or JSON)
    #[arg(short, long, env = "HERALD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Lifecycle state the host application is in
    #[arg(long, default_value = "foreground", value_parser = parse_state)]
    pub state: AppLifecycleState,

    /// Log a timing line for every dispatched notification
    #[arg(long)]
    pub debug: bool,

    /// Pretend the surface cannot group notifications
    #[arg(long)]
    pub no_grouping: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Dispatch a single notification
    Send {
        #[arg(long)]
        id: i32,
        #[arg(long, default_value = "basic_channel")]
        channel: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        group: Option<String>,
        #[arg(long, default_value = "default", value_parser = parse_layout)]
        layout: NotificationLayout,
        #[arg(long)]
        big_picture: Option<String>,
        #[arg(long)]
        hide_in_foreground: bool,
        #[arg(long)]
        hide_in_background: bool,
    },
    /// Dispatch every request of a JSON array file concurrently
    Replay {
        file: PathBuf,
    },
}

fn parse_state(value: &str) -> Result<AppLifecycleState, String> {
    value.parse().map_err(|e: herald_core::DispatchError| e.to_string())
}

fn parse_layout(value: &str) -> Result<NotificationLayout, String> {
    serde_json::from_value(serde_json::Value::String(value.replace('-', "_")))
        .map_err(|_| format!("unknown layout '{}'", value))
}
