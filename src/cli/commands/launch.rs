//! launch command - Resolve a workspace folder and start the tool in it

use crate::core::config::Config;
use crate::engine::{self, Context, Outcome, Request, Settings};
use crate::launcher::DetachedSpawner;
use crate::ui::output;
use crate::ui::prompts::TerminalPrompter;
use anyhow::Result;

/// Resolve the folder for `request` and launch the configured tool.
///
/// `binary` overrides the configured executable for this run.
pub fn launch(ctx: &Context, config: &Config, request: Request, binary: Option<&str>) -> Result<()> {
    let verbosity = ctx.verbosity();
    let cwd = ctx.working_dir()?;
    let settings = Settings::from_config(config, binary, &cwd);

    if let Some(path) = config.loaded_from() {
        output::debug(format!("config: {}", path.display()), verbosity);
    }

    let prompter = TerminalPrompter::new(ctx.interactive);
    match engine::invoke(ctx, &settings, &request, &prompter, &DetachedSpawner)? {
        Outcome::Launched { resolved, .. } => {
            output::print(
                format!(
                    "Launched {} in {}",
                    settings.target,
                    resolved.path().display()
                ),
                verbosity,
            );
        }
        Outcome::Cancelled => {}
    }

    Ok(())
}
