//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `gorepo`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap` (when the command takes any).
//! - An `execute` function that performs the command's logic by calling into
//!   the `gorepo` library with the resolved [`gorepo::context::Context`].

pub mod completions;
pub mod debug;
pub mod init;
pub mod list;
pub mod run;
pub mod version;
