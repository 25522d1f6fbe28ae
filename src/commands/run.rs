//! # Run Command Implementation
//!
//! This module implements the `run` subcommand, which runs a named script in
//! the selected modules.
//!
//! ## Functionality
//!
//! - **Targets**: `--target all` (default), `--target root`, or
//!   `--target api,web`; `root` cannot be combined with modules
//! - **Allow missing**: `--allow-missing` skips modules lacking the script as
//!   long as at least one module has it
//! - **Dry run**: `--dry-run` reports what would run without running it

use anyhow::Result;
use clap::Args;

use gorepo::context::Context;
use gorepo::dispatch::{DispatchOptions, DispatchReport, Dispatcher};
use gorepo::error::Error;
use gorepo::targets::{self, Targets};

/// Run a script in a given scope
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Name of the script to run
    pub script: Option<String>,

    /// Target root or specific modules (comma separated)
    #[arg(long, default_value = targets::ALL)]
    pub target: String,

    /// Print the scripts that would be executed without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Run the script in the modules that have it, even if it is missing in some
    #[arg(long)]
    pub allow_missing: bool,
}

/// Execute the `run` command.
pub fn execute(args: RunArgs, ctx: &Context) -> Result<()> {
    ctx.resolver.ensure_initialized()?;

    let script = args.script.unwrap_or_default();
    if script.is_empty() {
        return Err(Error::MissingScriptName.into());
    }
    let logger = &ctx.logger;
    logger.verbose(format!("running script '{script}'"));
    logger.verbose(format!("value for flag allow-missing: {}", args.allow_missing));
    logger.verbose(format!("value for flag dry-run:       {}", args.dry_run));
    logger.verbose(format!("value for flag target:        {}", args.target));

    targets::validate(&args.target)?;
    if targets::is_root(&args.target) {
        logger.warning("running script in root not supported yet");
        return Ok(());
    }

    let modules = ctx.resolver.discover_modules(logger)?;
    let Targets::Modules(selected) = targets::resolve(&args.target, &modules)? else {
        return Ok(());
    };

    let options = DispatchOptions {
        allow_missing: args.allow_missing,
        dry_run: args.dry_run,
    };
    let report = Dispatcher::new(ctx.executor.as_ref(), logger, ctx.resolver.root())
        .dispatch(&script, &selected, options)?;
    logger.success(summary(&script, &report));
    Ok(())
}

/// One-line outcome of a dispatch.
fn summary(script: &str, report: &DispatchReport) -> String {
    let mut line = if report.would_run.is_empty() {
        format!("script '{}' ran in {} module(s)", script, report.ran.len())
    } else {
        format!(
            "dry run: script '{}' would run in {} module(s)",
            script,
            report.would_run.len()
        )
    };
    if !report.skipped.is_empty() {
        line.push_str(&format!(", skipped {}", report.skipped.join(", ")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_ran_modules() {
        let report = DispatchReport {
            ran: vec!["api".to_string(), "web".to_string()],
            ..Default::default()
        };
        assert_eq!(summary("build", &report), "script 'build' ran in 2 module(s)");
    }

    #[test]
    fn test_summary_dry_run_with_skipped() {
        let report = DispatchReport {
            would_run: vec!["api".to_string()],
            skipped: vec!["docs".to_string()],
            ..Default::default()
        };
        assert_eq!(
            summary("test", &report),
            "dry run: script 'test' would run in 1 module(s), skipped docs"
        );
    }
}
