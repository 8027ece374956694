//! Herald CLI
//!
//! Drives the dispatch pipeline against console collaborators: presented
//! notifications and lifecycle events are printed to stdout.
//!
//! ```bash
//! herald send --id 1 --title "Hello" --group inbox
//! herald --state background replay notifications.json
//! ```

mod args;
mod commands;
mod console;
mod logging;

use anyhow::Result;
use args::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = commands::load_config(&cli)?;
    logging::init(&config.logging)?;
    commands::run(cli, config).await
}
