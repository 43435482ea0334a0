//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Builds an engine request from its arguments
//! 2. Calls the engine
//! 3. Formats and displays output
//!
//! Failures are returned as `anyhow` errors and reported once by `main`.
//! A dismissed selection prompt is not a failure: the handler returns
//! `Ok(())` without output.

mod completion;
mod config_cmd;
mod launch;
mod resolve;
mod roots;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use launch::launch;
pub use resolve::resolve;
pub use roots::roots;

use crate::cli::args::{Command, ConfigAction};
use crate::core::config::Config;
use crate::engine::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context, config: &Config) -> Result<()> {
    match command {
        Command::Launch {
            path,
            roots,
            binary,
        } => launch::launch(ctx, config, roots.into_request(path), binary.as_deref()),
        Command::Resolve { path, roots } => resolve::resolve(ctx, roots.into_request(path)),
        Command::Roots { roots } => roots::roots(ctx, roots.into_request(None)),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}
