//! # List Command Implementation
//!
//! Prints the name of every discovered module, one per line, in name order.

use anyhow::Result;

use gorepo::context::Context;

/// Execute the `list` command.
pub fn execute(ctx: &Context) -> Result<()> {
    ctx.resolver.ensure_initialized()?;

    let modules = ctx.resolver.discover_modules(&ctx.logger)?;
    if modules.is_empty() {
        ctx.logger.info("no modules found");
        return Ok(());
    }
    for module in &modules {
        ctx.logger.default_ln(&module.name);
    }
    Ok(())
}
