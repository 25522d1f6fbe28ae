//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use gorepo::context::Context;
use gorepo::defaults::VERSION;
use gorepo::logger::Logger;

use crate::commands;

/// gorepo - A CLI tool to manage Go monorepos
#[derive(Parser, Debug)]
#[command(name = "gorepo")]
#[command(version = VERSION, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging for all commands
    #[arg(long, global = true)]
    verbose: bool,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set diagnostic log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize a new monorepo at the working directory
    Init(commands::init::InitArgs),

    /// List all modules in the monorepo
    List,

    /// Run a script in a given scope (all modules, some modules, at root)
    Run(commands::run::RunArgs),

    /// Print the version of gorepo
    Version,

    /// Give information about the configuration
    Debug,

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Set up `log` diagnostics. `RUST_LOG` takes precedence over
    /// `--log-level`.
    pub fn init_logging(&self) {
        let env = env_logger::Env::default().default_filter_or(self.log_level.as_str());
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .try_init();
    }

    /// The console logger configured by the global flags.
    pub fn logger(&self) -> Logger {
        Logger::new(&self.color, self.verbose)
    }

    /// Execute the CLI command
    pub fn execute(self, logger: Logger) -> Result<()> {
        match self.command {
            Commands::Version => commands::version::execute(&logger),
            Commands::Completions(args) => commands::completions::execute(args),
            Commands::Init(args) => commands::init::execute(args, &Context::from_env(logger)?),
            Commands::List => commands::list::execute(&Context::from_env(logger)?),
            Commands::Run(args) => commands::run::execute(args, &Context::from_env(logger)?),
            Commands::Debug => commands::debug::execute(&Context::from_env(logger)?),
        }
    }
}
