//! # gorepo Library
//!
//! This library provides the core of the `gorepo` command-line tool, which
//! manages a monorepo made of independently versioned modules. The root is
//! marked by a `work.toml` file and each module folder by a `module.toml`
//! file declaring its scripts.
//!
//! ## Quick Example
//!
//! ```
//! use gorepo::defaults::StaticConfig;
//! use gorepo::filesystem::MemoryFS;
//! use gorepo::logger::Logger;
//! use gorepo::resolver::ConfigResolver;
//! use gorepo::targets::{self, Targets};
//!
//! let fs = MemoryFS::new()
//!     .with_file("/repo/work.toml", "name = \"shop\"\nstrategy = \"workspace\"")
//!     .with_file("/repo/services/api/module.toml", "[scripts]\ntest = \"go test ./...\"");
//!
//! let resolver = ConfigResolver::new(
//!     Box::new(fs),
//!     StaticConfig::default(),
//!     "/repo/services".into(),
//! ).unwrap();
//! assert_eq!(resolver.root(), std::path::Path::new("/repo"));
//!
//! let (logger, _) = Logger::capture();
//! let modules = resolver.discover_modules(&logger).unwrap();
//! let Targets::Modules(selected) = targets::resolve("api", &modules).unwrap() else {
//!     unreachable!()
//! };
//! assert_eq!(selected[0].script("test"), Some("go test ./..."));
//! ```
//!
//! ## Execution Flow
//!
//! 1.  **Root resolution** (`resolver`): walk up from the working directory to
//!     the nearest `work.toml`, within a bounded number of hops.
//! 2.  **Module discovery** (`resolver`): walk down from the root and load
//!     every `module.toml`, sorted by folder name.
//! 3.  **Target resolution** (`targets`): expand `all`, `root` or a list of
//!     module names.
//! 4.  **Dispatch** (`dispatch`): apply the allow-missing policy and run the
//!     script in each module, sequentially.
//!
//! Filesystem and process access go through the `Filesystem` and `Executor`
//! traits so the pipeline can be exercised entirely in memory.

pub mod bootstrap;
pub mod config;
pub mod context;
pub mod defaults;
pub mod dispatch;
pub mod error;
pub mod filesystem;
pub mod logger;
pub mod process;
pub mod resolver;
pub mod targets;
