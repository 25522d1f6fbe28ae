//! # Init Command Implementation
//!
//! This module implements the `init` subcommand, which turns the working
//! directory into a monorepo by writing `work.toml`.
//!
//! ## Functionality
//!
//! - **Name**: taken from the positional argument, otherwise prompted for
//!   with the root folder's name as default
//! - **Vendor**: taken from `--vendor`, otherwise prompted for (default yes)
//! - **Non-interactive**: `--yes` accepts every default without prompting
//! - **Workspace**: `go work init` runs when no `go.work` exists yet

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::path::Path;

use gorepo::bootstrap;
use gorepo::config::RootConfig;
use gorepo::context::Context;
use gorepo::error::Error;

/// Initialize a new monorepo at the working directory
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Name of the monorepo (defaults to the root folder name)
    pub name: Option<String>,

    /// Whether to vendor dependencies (true or false)
    #[arg(long, value_name = "BOOL")]
    pub vendor: Option<bool>,

    /// Accept defaults instead of prompting
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the `init` command.
pub fn execute(args: InitArgs, ctx: &Context) -> Result<()> {
    let root = ctx.resolver.root();
    if ctx.resolver.root_config_exists() {
        return Err(Error::AlreadyInitialized {
            root: root.to_path_buf(),
        }
        .into());
    }

    let theme = ColorfulTheme::default();
    let default = default_name(root);

    let name = match args.name.filter(|n| !n.trim().is_empty()) {
        Some(name) => name,
        None if args.yes => default,
        None => {
            let response: String = Input::with_theme(&theme)
                .with_prompt("Enter the monorepo name")
                .default(default)
                .interact_text()?;
            response.trim().to_string()
        }
    };

    ctx.logger
        .info("Using go workspace strategy by default (no other option for now)");

    let vendor = match args.vendor {
        Some(vendor) => vendor,
        None if args.yes => true,
        None => Confirm::with_theme(&theme)
            .with_prompt("Do you want to vendor dependencies?")
            .default(true)
            .interact()?,
    };

    let config = RootConfig::new(name, vendor);
    bootstrap::init_monorepo(&ctx.resolver, ctx.executor.as_ref(), &ctx.logger, &config)?;
    Ok(())
}

/// The base name of the root folder.
fn default_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "monorepo".to_string())
}
