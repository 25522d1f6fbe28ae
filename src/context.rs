//! Everything a command needs, resolved once per invocation.

use std::path::PathBuf;

use crate::defaults::StaticConfig;
use crate::error::{Error, Result};
use crate::filesystem::{Filesystem, OsFilesystem};
use crate::logger::Logger;
use crate::process::{Executor, ShellExecutor};
use crate::resolver::ConfigResolver;

/// The resolver, executor and logger shared by the commands.
pub struct Context {
    pub resolver: ConfigResolver,
    pub executor: Box<dyn Executor>,
    pub logger: Logger,
}

impl Context {
    /// Build a context on the host filesystem from the current directory.
    pub fn from_env(logger: Logger) -> Result<Self> {
        let working_dir = std::env::current_dir().map_err(Error::WorkingDirectory)?;
        Self::with_operations(
            Box::new(OsFilesystem),
            Box::new(ShellExecutor),
            logger,
            working_dir,
        )
    }

    /// Build a context with custom capabilities.
    pub fn with_operations(
        fs: Box<dyn Filesystem>,
        executor: Box<dyn Executor>,
        logger: Logger,
        working_dir: PathBuf,
    ) -> Result<Self> {
        let resolver = ConfigResolver::new(fs, StaticConfig::default(), working_dir)?;
        Ok(Self {
            resolver,
            executor,
            logger,
        })
    }
}
