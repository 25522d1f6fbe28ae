//! # Completions Command Implementation
//!
//! Generates shell completion scripts with `clap_complete` and writes them to
//! stdout.
//!
//! ```bash
//! gorepo completions bash > ~/.local/share/bash-completion/completions/gorepo
//! gorepo completions zsh > ~/.zfunc/_gorepo
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "gorepo", &mut io::stdout());
    Ok(())
}
