//! Default values for gorepo.
//!
//! Every tunable of the tool is a compiled-in constant; there is no
//! environment-variable configuration surface apart from logging and color.

/// Maximum number of parent directories visited while looking for the root.
pub const MAX_RECURSION: usize = 7;

/// File that marks the monorepo root and holds the root document.
pub const ROOT_FILE_NAME: &str = "work.toml";

/// File that marks a module folder and holds its scripts.
pub const MODULE_FILE_NAME: &str = "module.toml";

/// Toolchain workspace file created by `init` for the workspace strategy.
pub const WORKSPACE_FILE_NAME: &str = "go.work";

/// Toolchain program invoked for workspace management.
pub const TOOLCHAIN_PROGRAM: &str = "go";

/// Version written to a freshly initialized root document.
pub const DEFAULT_MONOREPO_VERSION: &str = "0.1.0";

/// Strategy written to a freshly initialized root document.
pub const DEFAULT_STRATEGY: &str = "workspace";

/// Version string injected at build time through `GOREPO_VERSION`.
pub const VERSION: &str = match option_env!("GOREPO_VERSION") {
    Some(version) => version,
    None => "dev",
};

/// The thresholds and marker names used by the configuration resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticConfig {
    /// Max recursion depth to search for the monorepo root
    pub max_recursion: usize,
    /// File name identifying the monorepo root
    pub root_file_name: String,
    /// File name identifying a module
    pub module_file_name: String,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            max_recursion: MAX_RECURSION,
            root_file_name: ROOT_FILE_NAME.to_string(),
            module_file_name: MODULE_FILE_NAME.to_string(),
        }
    }
}
