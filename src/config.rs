//! # Configuration Documents
//!
//! This module defines the two TOML documents gorepo works with:
//!
//! - **`RootConfig`**: the `work.toml` document at the monorepo root. It is
//!   written once by `init` and read by every other command.
//! - **`ModuleConfig`**: the `module.toml` document in each module folder.
//!   Only `scripts` is persisted; `name` and `relative_path` are derived from
//!   the folder location every time the module is discovered.
//!
//! ## Example
//!
//! ```
//! use gorepo::config::{ModuleConfig, RootConfig, Strategy};
//!
//! let root: RootConfig = toml::from_str(r#"
//! name = "shop"
//! version = "0.1.0"
//! strategy = "workspace"
//! vendor = true
//! "#).unwrap();
//! assert_eq!(root.strategy().unwrap(), Strategy::Workspace);
//!
//! let module: ModuleConfig = toml::from_str(r#"
//! [scripts]
//! test = "go test ./..."
//! "#).unwrap();
//! assert_eq!(module.script("test"), Some("go test ./..."));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_MONOREPO_VERSION, DEFAULT_STRATEGY};
use crate::error::Error;

/// How modules are tied together at the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// A toolchain workspace file lists the modules.
    Workspace,
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "workspace" => Ok(Strategy::Workspace),
            "rewrite" => Err(Error::UnsupportedStrategy {
                strategy: s.to_string(),
            }),
            other => Err(Error::InvalidStrategy {
                strategy: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Workspace => write!(f, "workspace"),
        }
    }
}

/// The configuration of the monorepo, persisted at the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootConfig {
    /// Name of the monorepo
    #[serde(default)]
    pub name: String,
    /// Semantic version of the monorepo
    #[serde(default)]
    pub version: String,
    /// `workspace` (supported) or `rewrite` (reserved)
    #[serde(default)]
    pub strategy: String,
    /// Whether dependencies are vendored
    #[serde(default)]
    pub vendor: bool,
    /// Root-level scripts, persisted but not dispatched yet
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
}

impl RootConfig {
    /// A fresh root document with the default version and strategy.
    pub fn new(name: impl Into<String>, vendor: bool) -> Self {
        Self {
            name: name.into(),
            version: DEFAULT_MONOREPO_VERSION.to_string(),
            strategy: DEFAULT_STRATEGY.to_string(),
            vendor,
            scripts: BTreeMap::new(),
        }
    }

    /// Parse the persisted strategy.
    pub fn strategy(&self) -> Result<Strategy, Error> {
        self.strategy.parse()
    }
}

/// The configuration of a module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Name of the module folder, derived at runtime
    #[serde(skip)]
    pub name: String,
    /// Path of the module folder relative to the root, derived at runtime
    #[serde(skip)]
    pub relative_path: PathBuf,
    /// Script name to shell command
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
}

impl ModuleConfig {
    /// The body of `script`, if defined and non-empty.
    pub fn script(&self, script: &str) -> Option<&str> {
        self.scripts
            .get(script)
            .map(String::as_str)
            .filter(|body| !body.is_empty())
    }
}
