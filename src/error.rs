//! # Error Handling
//!
//! This module defines the centralized error type for the `gorepo` library.
//! It uses the `thiserror` library to create an `Error` enum that covers the
//! failure modes of root resolution, document loading, target resolution and
//! script dispatch.
//!
//! ## Taxonomy
//!
//! - **Not found**: the root marker could not be located within the hop
//!   limit, or the root document is absent.
//! - **Validation**: missing script name, `root` combined with other targets,
//!   invalid or unsupported strategy, scripts missing per the allow-missing
//!   policy, duplicate module names.
//! - **I/O**: read, write and walk failures reported by the filesystem
//!   capability, always carrying the offending path.
//! - **Decode / Encode**: malformed or unserializable TOML documents.
//! - **Execution**: a child script or toolchain command failed to start or
//!   exited with a non-zero status.
//!
//! Nothing in the library retries: every error short-circuits the current
//! command and is returned unchanged to the command surface.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for gorepo operations
#[derive(Error, Debug)]
pub enum Error {
    /// The root marker was not found within the allowed number of hops.
    #[error("root not found: no {marker} within {hops} parent directories of {}", .start.display())]
    RootNotFound {
        start: PathBuf,
        marker: String,
        hops: usize,
    },

    /// The working directory could not be determined.
    #[error("failed to determine working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    /// No root document exists at the resolved root.
    #[error("monorepo not found at {}", .root.display())]
    NotInitialized { root: PathBuf },

    /// `init` was invoked on a root that already has a root document.
    #[error("monorepo already exists at {}", .root.display())]
    AlreadyInitialized { root: PathBuf },

    /// `run` was invoked without a script name.
    #[error("no script name provided, usage: gorepo run <SCRIPT>")]
    MissingScriptName,

    /// The target expression mixes `root` with other targets.
    #[error("cannot run script in root and in modules at the same time")]
    ConflictingTargets { expression: String },

    /// The strategy in the root document is not a known value.
    #[error("invalid strategy '{strategy}'")]
    InvalidStrategy { strategy: String },

    /// The strategy is known but not implemented.
    #[error("{strategy} strategy unsupported yet")]
    UnsupportedStrategy { strategy: String },

    /// Every targeted module lacks the requested script.
    #[error("not running script '{script}', because it is missing in all modules")]
    ScriptMissingEverywhere { script: String },

    /// Some targeted modules lack the requested script and missing scripts
    /// are not allowed.
    #[error("not running script '{script}', because it is missing in following modules: {}", .modules.join(", "))]
    ScriptMissingIn { script: String, modules: Vec<String> },

    /// Two module folders share the same base name.
    #[error("duplicate module name '{name}' at {} and {}", .first.display(), .second.display())]
    DuplicateModule {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// A document could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the monorepo tree failed.
    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is not valid TOML for its schema.
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A document is not valid UTF-8.
    #[error("failed to decode {}: {source}", .path.display())]
    InvalidUtf8 {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    /// A document could not be encoded.
    #[error("failed to encode configuration: {0}")]
    Encode(#[from] toml::ser::Error),

    /// A child process could not be started or exited unsuccessfully.
    #[error("command failed in {}: {command} - {message}", .dir.display())]
    Process {
        command: String,
        dir: PathBuf,
        message: String,
    },

    /// A module script failed; the remaining modules were not run.
    #[error("script '{script}' failed in module '{module}': {source}")]
    ScriptFailed {
        script: String,
        module: String,
        #[source]
        source: Box<Error>,
    },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
