//! resolve command - Print the workspace folder launch would use

use crate::engine::{self, Context, Request};
use crate::ui::prompts::TerminalPrompter;
use anyhow::Result;

/// Print the resolved folder path on stdout.
///
/// The path is printed even in quiet mode since it is the command's result.
pub fn resolve(ctx: &Context, request: Request) -> Result<()> {
    let prompter = TerminalPrompter::new(ctx.interactive);
    if let Some(resolved) = engine::resolve(ctx, &request, &prompter)? {
        println!("{}", resolved.path().display());
    }
    Ok(())
}
