//! Monorepo initialization.
//!
//! Prompting for the name and vendor choice happens in the `init` command;
//! this module takes the finished [`RootConfig`] and turns the resolved root
//! into a monorepo.

use crate::config::{RootConfig, Strategy};
use crate::defaults::{ROOT_FILE_NAME, WORKSPACE_FILE_NAME};
use crate::error::{Error, Result};
use crate::logger::Logger;
use crate::process::Executor;
use crate::resolver::ConfigResolver;

/// Initialize the monorepo at the resolver's root.
///
/// Fails without writing anything when a root document already exists.
/// For the workspace strategy, `go work init` is run first if no workspace
/// file is present.
pub fn init_monorepo(
    resolver: &ConfigResolver,
    executor: &dyn Executor,
    logger: &Logger,
    config: &RootConfig,
) -> Result<()> {
    if resolver.root_config_exists() {
        return Err(Error::AlreadyInitialized {
            root: resolver.root().to_path_buf(),
        });
    }

    match config.strategy()? {
        Strategy::Workspace => {
            if resolver.workspace_file_exists() {
                logger.verbose(format!(
                    "{WORKSPACE_FILE_NAME} already exists, no need to create one"
                ));
            } else {
                logger.verbose(format!(
                    "{WORKSPACE_FILE_NAME} does not exist yet, running 'go work init'"
                ));
                executor.run_toolchain(resolver.root(), &["work", "init"])?;
            }
        }
    }

    resolver.write_root_config(config)?;
    logger.verbose(format!("created monorepo configuration '{ROOT_FILE_NAME}' at root"));
    logger.success(format!(
        "monorepo initialized at {}",
        resolver.root().display()
    ));
    Ok(())
}
