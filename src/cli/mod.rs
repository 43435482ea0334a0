//! cli
//!
//! Command-line interface layer for prompt-launch.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration once and build the process-wide settings
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! [`crate::engine`], which resolves the workspace folder and launches the
//! tool. The CLI is the host: it supplies the open folders, the hint and the
//! active document, and reports the outcome.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::core::config::Config;
use crate::engine;
use anyhow::{Context as _, Result};
use args::Command;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    // Config commands must work even when the file is broken, so they
    // read it themselves.
    let config = match &cli.command {
        Command::Config { .. } | Command::Completion { .. } => Config::default(),
        _ => Config::load().context("Failed to load configuration")?,
    };

    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: cli.interactive(config.interactive()),
    };

    commands::dispatch(cli.command, &ctx, &config)
}
