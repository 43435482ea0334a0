//! roots command - List the open workspace folders

use crate::engine::{self, Context, Request};
use crate::ui::output;
use anyhow::Result;

/// List open folders as `name<TAB>path`, one per line.
pub fn roots(ctx: &Context, request: Request) -> Result<()> {
    let roots = engine::open_roots(ctx, &request)?;
    if roots.is_empty() {
        output::warn("no workspace folder is open", ctx.verbosity());
        return Ok(());
    }
    println!("{}", output::format_roots(&roots));
    Ok(())
}
