//! # Version Command Implementation
//!
//! Prints the version injected at build time through `GOREPO_VERSION`, or
//! `dev` for local builds. Works outside of any monorepo.

use anyhow::Result;

use gorepo::defaults::VERSION;
use gorepo::logger::Logger;

/// Execute the `version` command.
pub fn execute(logger: &Logger) -> Result<()> {
    logger.default_ln(VERSION);
    Ok(())
}
