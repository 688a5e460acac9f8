//! DocChat CLI application
//!
//! Chat with documents through a retrieval backend. Sessions, their
//! transcripts and attached files are kept in `~/.docchat`.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/docchat-cli
//! ```
//!
//! # Modes
//!
//! ## Interactive (default)
//! `docchat` opens a prompt on the active session. Plain lines are questions;
//! `/help` lists the slash commands.
//!
//! ## One-shot
//! `docchat upload report.pdf`, `docchat send "..."`, `docchat sessions` and
//! friends run a single operation and exit. Use `--session <id>` to target a
//! session other than the first one.

#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

mod app;
mod args;
mod commands;
mod console;
mod controller;
mod logging;
mod router;

use clap::Parser;
use docchat_core::config::ConfigLoader;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::new()
        .with_file(&cli.config_file)
        .with_env()
        .with_overrides(cli.overrides())
        .load()?;

    // Set RUST_LOG=debug for verbose logging regardless of config
    logging::init(&config.logging)?;
    console::configure_colors();

    router::route(cli, config).await?;
    Ok(())
}
