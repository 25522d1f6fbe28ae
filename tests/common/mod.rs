//! Shared test utilities for E2E tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_root("shop");
//!     fixture.command().arg("list").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::documents;
    pub use super::TestFixture;
}

/// Document snippets for testing.
#[allow(dead_code)]
pub mod documents {
    /// Root document using the workspace strategy.
    pub fn root(name: &str) -> String {
        format!(
            "name = \"{name}\"\nversion = \"0.1.0\"\nstrategy = \"workspace\"\nvendor = true\n"
        )
    }

    /// Module document with the given `(script, body)` pairs.
    pub fn module(scripts: &[(&str, &str)]) -> String {
        let mut doc = String::from("[scripts]\n");
        for (name, body) in scripts {
            doc.push_str(&format!("{name} = '{body}'\n"));
        }
        doc
    }
}

/// A temporary directory holding a monorepo under test.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_root("shop")
///     .with_module("services/api", &[("build", "touch built")]);
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `go.work` file so `init` never needs the go toolchain.
    pub fn with_workspace(self) -> Self {
        self.with_file("go.work", "go 1.22\n")
    }

    /// Add a `work.toml` root document and a `go.work` file.
    pub fn with_root(self, name: &str) -> Self {
        self.with_workspace()
            .with_file("work.toml", &documents::root(name))
    }

    /// Add a module folder with a `module.toml` declaring `scripts`.
    pub fn with_module(self, path: &str, scripts: &[(&str, &str)]) -> Self {
        self.with_file(&format!("{path}/module.toml"), &documents::module(scripts))
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        self.command_in("")
    }

    /// Create a command running in a sub-directory of the fixture.
    pub fn command_in(&self, dir: &str) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gorepo");
        cmd.current_dir(self.path().join(dir))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
