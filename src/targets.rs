//! Target resolution for `run --target`.
//!
//! A target expression is `all`, `root`, or a comma-separated list of module
//! names. `root` cannot be combined with anything else. Names that match no
//! discovered module are dropped silently, and the selected modules keep the
//! discovery order rather than the order of the expression.

use crate::config::ModuleConfig;
use crate::error::{Error, Result};

/// Token selecting every discovered module.
pub const ALL: &str = "all";

/// Token selecting the monorepo root.
pub const ROOT: &str = "root";

/// The resolved set of places a script runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    /// The monorepo root alone.
    Root,
    /// A subset of the discovered modules, in discovery order.
    Modules(Vec<ModuleConfig>),
}

/// Split a target expression into its tokens.
pub fn tokens(expression: &str) -> Vec<&str> {
    expression.split(',').collect()
}

/// Reject expressions that combine `root` with other targets.
pub fn validate(expression: &str) -> Result<()> {
    let tokens = tokens(expression);
    if tokens.len() > 1 && tokens.contains(&ROOT) {
        return Err(Error::ConflictingTargets {
            expression: expression.to_string(),
        });
    }
    Ok(())
}

/// Whether the expression selects the root.
pub fn is_root(expression: &str) -> bool {
    tokens(expression) == [ROOT]
}

/// Expand `expression` against the discovered modules.
pub fn resolve(expression: &str, modules: &[ModuleConfig]) -> Result<Targets> {
    validate(expression)?;
    let tokens = tokens(expression);
    if tokens == [ROOT] {
        return Ok(Targets::Root);
    }
    if tokens == [ALL] {
        return Ok(Targets::Modules(modules.to_vec()));
    }
    let selected = modules
        .iter()
        .filter(|module| tokens.contains(&module.name.as_str()))
        .cloned()
        .collect();
    Ok(Targets::Modules(selected))
}
