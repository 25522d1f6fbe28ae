//! # gorepo CLI
//!
//! This is the binary entry point for the `gorepo` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Logging top-level errors in the fatal style and exiting with status 1.
//!
//! The core application logic is defined in the `lib.rs` library crate, ensuring
//! that the binary is a thin wrapper around the reusable library functionality.

mod cli;
mod commands;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    cli.init_logging();
    let logger = cli.logger();

    if let Err(err) = cli.execute(logger.clone()) {
        logger.fatal(err.to_string());
        std::process::exit(1);
    }
}
