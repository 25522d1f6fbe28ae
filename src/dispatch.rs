//! # Script Dispatch
//!
//! Runs one named script across the resolved target modules.
//!
//! 1. **Classify**: split the targets into modules that define a non-empty
//!    body for the script and modules that do not.
//! 2. **Policy**: refuse when no target has the script (even with
//!    allow-missing, and even when there are no targets at all); refuse when
//!    some lack it unless allow-missing is set, in which case they are
//!    skipped.
//! 3. **Execute**: run the script in each module directory, one module at a
//!    time, in target order. Under dry-run nothing is executed. The first
//!    failure stops the remaining modules; nothing is rolled back.

use std::path::{Path, PathBuf};

use crate::config::ModuleConfig;
use crate::error::{Error, Result};
use crate::logger::Logger;
use crate::process::Executor;

/// Flags of a `run` invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Proceed when a strict subset of targets lacks the script
    pub allow_missing: bool,
    /// Classify and log, but execute nothing
    pub dry_run: bool,
}

/// Targets split by whether they define the script.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Classification<'a> {
    pub with_script: Vec<&'a ModuleConfig>,
    pub missing: Vec<&'a ModuleConfig>,
}

impl Classification<'_> {
    /// Names of the modules lacking the script.
    pub fn missing_names(&self) -> Vec<String> {
        self.missing.iter().map(|m| m.name.clone()).collect()
    }
}

/// What a successful dispatch did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Modules whose script was executed
    pub ran: Vec<String>,
    /// Modules whose script would have run under dry-run
    pub would_run: Vec<String>,
    /// Modules skipped because they lack the script
    pub skipped: Vec<String>,
}

/// Split `targets` by whether they define a non-empty `script`.
pub fn classify<'a>(script: &str, targets: &'a [ModuleConfig]) -> Classification<'a> {
    let (with_script, missing): (Vec<_>, Vec<_>) = targets
        .iter()
        .partition(|m| m.script(script).is_some());
    Classification {
        with_script,
        missing,
    }
}

/// Runs module scripts through an [`Executor`].
pub struct Dispatcher<'a> {
    executor: &'a dyn Executor,
    logger: &'a Logger,
    root: PathBuf,
}

impl<'a> Dispatcher<'a> {
    pub fn new(executor: &'a dyn Executor, logger: &'a Logger, root: &Path) -> Self {
        Self {
            executor,
            logger,
            root: root.to_path_buf(),
        }
    }

    /// Run `script` in every target that defines it.
    pub fn dispatch(
        &self,
        script: &str,
        targets: &[ModuleConfig],
        options: DispatchOptions,
    ) -> Result<DispatchReport> {
        if script.is_empty() {
            return Err(Error::MissingScriptName);
        }

        self.logger.verbose("checking if all modules have the script");
        let classification = classify(script, targets);
        let skipped = self.apply_policy(script, &classification, options)?;

        let mut report = DispatchReport {
            skipped,
            ..Default::default()
        };
        for module in targets {
            let Some(body) = module.script(script) else {
                continue;
            };
            self.logger.info(format!(
                "running script {} in module {}",
                script, module.name
            ));
            if options.dry_run {
                report.would_run.push(module.name.clone());
                continue;
            }
            let dir = self.root.join(&module.relative_path);
            self.executor
                .run_shell(&dir, body)
                .map_err(|source| Error::ScriptFailed {
                    script: script.to_string(),
                    module: module.name.clone(),
                    source: Box::new(source),
                })?;
            report.ran.push(module.name.clone());
        }
        Ok(report)
    }

    fn apply_policy(
        &self,
        script: &str,
        classification: &Classification<'_>,
        options: DispatchOptions,
    ) -> Result<Vec<String>> {
        if classification.with_script.is_empty() {
            return Err(Error::ScriptMissingEverywhere {
                script: script.to_string(),
            });
        }
        let missing = classification.missing_names();
        if missing.is_empty() {
            self.logger.verbose("all modules have the script");
            return Ok(missing);
        }
        if !options.allow_missing {
            return Err(Error::ScriptMissingIn {
                script: script.to_string(),
                modules: missing,
            });
        }
        self.logger.verbose(format!(
            "script '{}' is missing in following modules (but flag allow-missing was passed): {}",
            script,
            missing.join(", ")
        ));
        Ok(missing)
    }
}
