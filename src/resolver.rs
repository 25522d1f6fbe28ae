//! # Configuration Resolver
//!
//! Locates the monorepo root, loads and saves the root document, and
//! discovers modules.
//!
//! ## Root resolution
//!
//! [`resolve_root`] starts at the working directory and checks for the root
//! marker in at most `max_recursion + 1` directories, moving to the parent
//! after each miss. Reaching the filesystem boundary before the limit falls
//! back to the working directory so that `init` can run in an uninitialized
//! tree; exhausting the limit is a [`Error::RootNotFound`].
//!
//! ## Module discovery
//!
//! [`ConfigResolver::discover_modules`] walks the whole tree under the root.
//! Every directory below the root holding the module marker becomes a module
//! named after the folder. The result is sorted by name so that listing and
//! dispatch order never depend on the filesystem enumeration order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::{ModuleConfig, RootConfig};
use crate::defaults::{StaticConfig, WORKSPACE_FILE_NAME};
use crate::error::{Error, Result};
use crate::filesystem::Filesystem;
use crate::logger::Logger;

/// Find the monorepo root by walking up from `working_dir`.
pub fn resolve_root(
    fs: &dyn Filesystem,
    working_dir: &Path,
    marker: &str,
    max_hops: usize,
) -> Result<PathBuf> {
    let mut current = working_dir.to_path_buf();
    for _ in 0..=max_hops {
        if fs.exists(&current.join(marker)) {
            return Ok(current);
        }
        match current.parent() {
            Some(parent) if parent != current => current = parent.to_path_buf(),
            // Filesystem boundary: let the caller work in place
            _ => return Ok(working_dir.to_path_buf()),
        }
    }
    Err(Error::RootNotFound {
        start: working_dir.to_path_buf(),
        marker: marker.to_string(),
        hops: max_hops,
    })
}

/// Runtime paths resolved once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Working directory, folder where the cli was executed
    pub working_dir: PathBuf,
    /// Root of the monorepo
    pub root: PathBuf,
}

/// Loads the root document and the module documents of one monorepo.
pub struct ConfigResolver {
    fs: Box<dyn Filesystem>,
    statics: StaticConfig,
    runtime: RuntimeConfig,
}

impl ConfigResolver {
    /// Resolve the root from `working_dir` and build a resolver for it.
    pub fn new(
        fs: Box<dyn Filesystem>,
        statics: StaticConfig,
        working_dir: PathBuf,
    ) -> Result<Self> {
        let root = resolve_root(
            fs.as_ref(),
            &working_dir,
            &statics.root_file_name,
            statics.max_recursion,
        )?;
        log::debug!("resolved monorepo root {}", root.display());
        Ok(Self {
            fs,
            statics,
            runtime: RuntimeConfig { working_dir, root },
        })
    }

    pub fn root(&self) -> &Path {
        &self.runtime.root
    }

    pub fn runtime(&self) -> &RuntimeConfig {
        &self.runtime
    }

    pub fn statics(&self) -> &StaticConfig {
        &self.statics
    }

    /// Path of the root document.
    pub fn root_config_path(&self) -> PathBuf {
        self.runtime.root.join(&self.statics.root_file_name)
    }

    pub fn root_config_exists(&self) -> bool {
        self.fs.exists(&self.root_config_path())
    }

    /// Fail with [`Error::NotInitialized`] unless the root document exists.
    pub fn ensure_initialized(&self) -> Result<()> {
        if self.root_config_exists() {
            Ok(())
        } else {
            Err(Error::NotInitialized {
                root: self.runtime.root.clone(),
            })
        }
    }

    pub fn load_root_config(&self) -> Result<RootConfig> {
        let path = self.root_config_path();
        let bytes = self.read(&path)?;
        decode(&path, &bytes)
    }

    /// Encode and write the root document. The write is not atomic.
    pub fn write_root_config(&self, config: &RootConfig) -> Result<()> {
        let encoded = toml::to_string(config)?;
        let path = self.root_config_path();
        self.fs
            .write(&path, encoded.as_bytes())
            .map_err(|source| Error::Write { path, source })
    }

    pub fn workspace_file_exists(&self) -> bool {
        self.fs.exists(&self.runtime.root.join(WORKSPACE_FILE_NAME))
    }

    /// Walk the tree under the root and load every module, sorted by name.
    ///
    /// A walk or load failure aborts discovery and is also reported on
    /// `logger` as a warning.
    pub fn discover_modules(&self, logger: &Logger) -> Result<Vec<ModuleConfig>> {
        let root = &self.runtime.root;
        let entries = self.fs.walk(root).map_err(|source| {
            logger.warning(source.to_string());
            Error::Walk {
                path: root.clone(),
                source,
            }
        })?;

        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        let mut modules = Vec::new();
        for entry in entries.iter().filter(|e| e.is_dir && e.path != *root) {
            if !self
                .fs
                .exists(&entry.path.join(&self.statics.module_file_name))
            {
                continue;
            }
            let Ok(relative) = entry.path.strip_prefix(root) else {
                continue;
            };
            let module = self.load_module_config(relative).inspect_err(|err| {
                logger.warning(err.to_string());
            })?;
            if let Some(first) = seen.insert(module.name.clone(), relative.to_path_buf()) {
                return Err(Error::DuplicateModule {
                    name: module.name,
                    first,
                    second: relative.to_path_buf(),
                });
            }
            modules.push(module);
        }

        modules.sort_by(|a, b| a.name.cmp(&b.name));
        log::debug!("discovered {} module(s)", modules.len());
        Ok(modules)
    }

    /// Load the module document under `relative_path` and derive its
    /// identity from the path.
    pub fn load_module_config(&self, relative_path: &Path) -> Result<ModuleConfig> {
        let path = self
            .runtime
            .root
            .join(relative_path)
            .join(&self.statics.module_file_name);
        let bytes = self.read(&path)?;
        let mut module: ModuleConfig = decode(&path, &bytes)?;
        module.name = relative_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        module.relative_path = relative_path.to_path_buf();
        Ok(module)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.fs.read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn decode<T: serde::de::DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T> {
    let text = std::str::from_utf8(bytes).map_err(|source| Error::InvalidUtf8 {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(text).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFS;
    use crate::logger::Level;
    use proptest::prelude::*;

    const ROOT_DOC: &str = r#"
name = "shop"
version = "0.1.0"
strategy = "workspace"
vendor = true
"#;

    fn resolver_at(fs: MemoryFS, working_dir: &str) -> ConfigResolver {
        ConfigResolver::new(
            Box::new(fs),
            StaticConfig::default(),
            PathBuf::from(working_dir),
        )
        .unwrap()
    }

    fn nested(base: &str, depth: usize) -> PathBuf {
        let mut path = PathBuf::from(base);
        for level in 1..=depth {
            path.push(format!("d{level}"));
        }
        path
    }

    #[test]
    fn test_resolve_root_in_working_dir() {
        let fs = MemoryFS::new().with_file("/repo/work.toml", ROOT_DOC);
        let root = resolve_root(&fs, Path::new("/repo"), "work.toml", 7).unwrap();
        assert_eq!(root, PathBuf::from("/repo"));
    }

    #[test]
    fn test_resolve_root_up_to_seven_levels() {
        let fs = MemoryFS::new().with_file("/srv/a/b/c/repo/work.toml", ROOT_DOC);
        for depth in 0..=7 {
            let wd = nested("/srv/a/b/c/repo", depth);
            let root = resolve_root(&fs, &wd, "work.toml", 7).unwrap();
            assert_eq!(root, PathBuf::from("/srv/a/b/c/repo"), "depth {depth}");
        }
    }

    #[test]
    fn test_resolve_root_beyond_limit_fails() {
        let fs = MemoryFS::new().with_file("/srv/a/b/c/repo/work.toml", ROOT_DOC);
        let wd = nested("/srv/a/b/c/repo", 8);
        let err = resolve_root(&fs, &wd, "work.toml", 7).unwrap_err();
        assert!(matches!(err, Error::RootNotFound { hops: 7, .. }));
    }

    #[test]
    fn test_resolve_root_falls_back_at_filesystem_boundary() {
        let fs = MemoryFS::new();
        let root = resolve_root(&fs, Path::new("/a/b"), "work.toml", 7).unwrap();
        assert_eq!(root, PathBuf::from("/a/b"));
    }

    #[test]
    fn test_resolve_root_prefers_closest_marker() {
        let fs = MemoryFS::new()
            .with_file("/outer/work.toml", ROOT_DOC)
            .with_file("/outer/inner/work.toml", ROOT_DOC);
        let root = resolve_root(&fs, Path::new("/outer/inner/x"), "work.toml", 7).unwrap();
        assert_eq!(root, PathBuf::from("/outer/inner"));
    }

    #[test]
    fn test_root_config_round_trip_through_resolver() {
        let resolver = resolver_at(MemoryFS::new(), "/repo");
        assert!(!resolver.root_config_exists());
        assert!(matches!(
            resolver.ensure_initialized(),
            Err(Error::NotInitialized { .. })
        ));

        let config = RootConfig::new("shop", true);
        resolver.write_root_config(&config).unwrap();
        assert!(resolver.root_config_exists());
        assert_eq!(resolver.load_root_config().unwrap(), config);
    }

    #[test]
    fn test_load_root_config_decode_error() {
        let fs = MemoryFS::new().with_file("/repo/work.toml", "name = [");
        let resolver = resolver_at(fs, "/repo");
        assert!(matches!(
            resolver.load_root_config(),
            Err(Error::Decode { .. })
        ));
    }

    #[test]
    fn test_load_root_config_read_error() {
        let fs = MemoryFS::new()
            .with_file("/repo/work.toml", ROOT_DOC)
            .with_unreadable("/repo/work.toml");
        let resolver = resolver_at(fs, "/repo");
        assert!(matches!(
            resolver.load_root_config(),
            Err(Error::Read { .. })
        ));
    }

    #[test]
    fn test_discover_modules_sorted_with_derived_identity() {
        let fs = MemoryFS::new()
            .with_file("/repo/work.toml", ROOT_DOC)
            .with_file("/repo/services/web/module.toml", "[scripts]\ntest = \"go test\"")
            .with_file("/repo/libs/auth/module.toml", "")
            .with_file("/repo/api/module.toml", "[scripts]\nbuild = \"go build\"")
            .with_file("/repo/docs/README.md", "not a module");
        let resolver = resolver_at(fs, "/repo/services");
        let (logger, _) = Logger::capture();

        let modules = resolver.discover_modules(&logger).unwrap();
        let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["api", "auth", "web"]);
        assert_eq!(modules[2].relative_path, PathBuf::from("services/web"));
        assert_eq!(modules[2].script("test"), Some("go test"));
        assert!(modules[1].scripts.is_empty());
    }

    #[test]
    fn test_discover_modules_ignores_marker_at_root() {
        let fs = MemoryFS::new()
            .with_file("/repo/work.toml", ROOT_DOC)
            .with_file("/repo/module.toml", "")
            .with_file("/repo/api/module.toml", "");
        let resolver = resolver_at(fs, "/repo");
        let (logger, _) = Logger::capture();

        let modules = resolver.discover_modules(&logger).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "api");
    }

    #[test]
    fn test_discover_modules_rejects_duplicate_names() {
        let fs = MemoryFS::new()
            .with_file("/repo/work.toml", ROOT_DOC)
            .with_file("/repo/services/api/module.toml", "")
            .with_file("/repo/legacy/api/module.toml", "");
        let resolver = resolver_at(fs, "/repo");
        let (logger, _) = Logger::capture();

        match resolver.discover_modules(&logger) {
            Err(Error::DuplicateModule {
                name,
                first,
                second,
            }) => {
                assert_eq!(name, "api");
                let mut paths = vec![first, second];
                paths.sort();
                assert_eq!(
                    paths,
                    vec![PathBuf::from("legacy/api"), PathBuf::from("services/api")]
                );
            }
            other => panic!("expected duplicate module error, got {other:?}"),
        }
    }

    #[test]
    fn test_discover_modules_walk_error_is_logged_and_returned() {
        let fs = MemoryFS::new()
            .with_file("/repo/work.toml", ROOT_DOC)
            .with_walk_error("permission denied on /repo/secret");
        let resolver = resolver_at(fs, "/repo");
        let (logger, lines) = Logger::capture();

        let err = resolver.discover_modules(&logger).unwrap_err();
        assert!(matches!(err, Error::Walk { .. }));
        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::Warning);
        assert!(lines[0].1.contains("permission denied"));
    }

    #[test]
    fn test_discover_modules_malformed_module_aborts() {
        let fs = MemoryFS::new()
            .with_file("/repo/work.toml", ROOT_DOC)
            .with_file("/repo/api/module.toml", "[scripts\n")
            .with_file("/repo/web/module.toml", "");
        let resolver = resolver_at(fs, "/repo");
        let (logger, _) = Logger::capture();

        assert!(matches!(
            resolver.discover_modules(&logger),
            Err(Error::Decode { .. })
        ));
    }

    #[test]
    fn test_discover_modules_rejects_invalid_utf8() {
        let fs = MemoryFS::new().with_file("/repo/work.toml", ROOT_DOC);
        fs.add_file("/repo/api/module.toml", b"[scripts]\nbuild = \"echo \xff\"\n");
        let resolver = resolver_at(fs, "/repo");
        let (logger, _) = Logger::capture();

        let err = resolver.discover_modules(&logger).unwrap_err();
        assert!(matches!(err, Error::InvalidUtf8 { .. }));
        assert!(err.to_string().contains("failed to decode /repo/api/module.toml"));
    }

    #[test]
    fn test_load_root_config_rejects_invalid_utf8() {
        let fs = MemoryFS::new();
        fs.add_file("/repo/work.toml", b"name = \"sh\xffp\"\n");
        let resolver = resolver_at(fs, "/repo");

        assert!(matches!(
            resolver.load_root_config(),
            Err(Error::InvalidUtf8 { .. })
        ));
    }

    #[test]
    fn test_discover_modules_load_error_is_logged() {
        let fs = MemoryFS::new()
            .with_file("/repo/work.toml", ROOT_DOC)
            .with_file("/repo/api/module.toml", "[scripts\n");
        let resolver = resolver_at(fs, "/repo");
        let (logger, lines) = Logger::capture();

        assert!(resolver.discover_modules(&logger).is_err());
        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::Warning);
        assert!(lines[0].1.contains("failed to decode"));
    }

    #[test]
    fn test_discover_modules_on_disk() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("work.toml"), ROOT_DOC).unwrap();
        for name in ["zeta", "alpha"] {
            let dir = temp.path().join("mods").join(name);
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("module.toml"), "[scripts]\nhi = \"echo hi\"\n").unwrap();
        }
        let resolver = ConfigResolver::new(
            Box::new(crate::filesystem::OsFilesystem),
            StaticConfig::default(),
            temp.path().join("mods"),
        )
        .unwrap();
        let (logger, _) = Logger::capture();

        assert_eq!(resolver.root(), temp.path());
        let modules = resolver.discover_modules(&logger).unwrap();
        let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert_eq!(modules[0].relative_path, Path::new("mods").join("alpha"));
    }

    proptest! {
        #[test]
        fn discovery_is_sorted_by_name(
            names in prop::collection::hash_set("[a-z][a-z0-9_]{0,8}", 0..12),
            nest in prop::collection::vec(0usize..3, 12),
        ) {
            let fs = MemoryFS::new().with_file("/repo/work.toml", ROOT_DOC);
            for (i, name) in names.iter().enumerate() {
                let mut dir = PathBuf::from("/repo");
                for level in 0..nest[i % nest.len()] {
                    dir.push(format!("group{level}"));
                }
                fs.add_file(dir.join(name).join("module.toml"), b"");
            }
            let resolver = resolver_at(fs, "/repo");
            let (logger, _) = Logger::capture();

            let modules = resolver.discover_modules(&logger).unwrap();
            let found: Vec<String> = modules.iter().map(|m| m.name.clone()).collect();
            let mut expected: Vec<String> = names.iter().cloned().collect();
            expected.sort();
            prop_assert_eq!(found, expected);
        }
    }
}
