//! Process capability: shell scripts and toolchain sub-commands.
//!
//! Scripts are run with `/bin/sh -c` in the module directory and inherit the
//! parent's stdout and stderr, so their output is streamed as it happens.
//! Toolchain commands (`go work init`) are short and have their combined
//! output captured into the error when they fail.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::defaults::TOOLCHAIN_PROGRAM;
use crate::error::{Error, Result};

/// Trait for process execution - allows mocking in tests
pub trait Executor {
    /// Run a shell script in `dir`, blocking until it exits.
    fn run_shell(&self, dir: &Path, script: &str) -> Result<()>;

    /// Run the toolchain program with `args` in `dir`.
    fn run_toolchain(&self, dir: &Path, args: &[&str]) -> Result<()>;
}

/// The default implementation of `Executor`, which spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellExecutor;

impl Executor for ShellExecutor {
    fn run_shell(&self, dir: &Path, script: &str) -> Result<()> {
        if !dir.is_dir() {
            return Err(Error::Process {
                command: script.to_string(),
                dir: dir.to_path_buf(),
                message: "directory does not exist".to_string(),
            });
        }

        log::debug!("sh -c {:?} in {}", script, dir.display());
        let status = Command::new("/bin/sh")
            .args(["-c", script])
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::Process {
                command: script.to_string(),
                dir: dir.to_path_buf(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(Error::Process {
                command: script.to_string(),
                dir: dir.to_path_buf(),
                message: status.to_string(),
            });
        }
        Ok(())
    }

    fn run_toolchain(&self, dir: &Path, args: &[&str]) -> Result<()> {
        let command = format!("{} {}", TOOLCHAIN_PROGRAM, args.join(" "));
        log::debug!("{} in {}", command, dir.display());

        let output = Command::new(TOOLCHAIN_PROGRAM)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| Error::Process {
                command: command.clone(),
                dir: dir.to_path_buf(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(Error::Process {
                command,
                dir: dir.to_path_buf(),
                message: format!("{}\nOutput: {}", output.status, combined.trim_end()),
            });
        }
        Ok(())
    }
}
