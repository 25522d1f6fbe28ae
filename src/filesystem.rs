//! Filesystem capability used by the configuration resolver.
//!
//! The resolver never touches `std::fs` directly. It goes through the
//! [`Filesystem`] trait so that the discovery and loading logic can run
//! against [`MemoryFS`] in tests and against [`OsFilesystem`] in the binary.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One entry yielded by a recursive walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Full path of the entry
    pub path: PathBuf,
    /// Base name of the entry
    pub name: String,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

impl WalkEntry {
    fn new(path: PathBuf, is_dir: bool) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name, is_dir }
    }
}

/// Trait for filesystem operations - allows swapping in memory for tests
pub trait Filesystem {
    /// Check whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the full contents of a file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write `content` to `path`, replacing any previous file.
    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Recursively walk `root`, yielding `root` itself and every entry below
    /// it. The order of entries is unspecified.
    fn walk(&self, root: &Path) -> io::Result<Vec<WalkEntry>>;
}

/// The default implementation of `Filesystem`, backed by the host
/// filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        fs::write(path, content)
    }

    fn walk(&self, root: &Path) -> io::Result<Vec<WalkEntry>> {
        let mut entries = Vec::new();
        for entry in walkdir::WalkDir::new(root) {
            let entry = entry?;
            entries.push(WalkEntry::new(
                entry.path().to_path_buf(),
                entry.file_type().is_dir(),
            ));
        }
        Ok(entries)
    }
}

/// In-memory filesystem.
///
/// Only files are stored; directories exist implicitly as ancestors of
/// stored files. Interior mutability lets `write` work through `&self` like
/// the host implementation.
#[derive(Debug, Default)]
pub struct MemoryFS {
    files: std::sync::Mutex<HashMap<PathBuf, Vec<u8>>>,
    unreadable: HashSet<PathBuf>,
    walk_error: Option<String>,
}

impl MemoryFS {
    /// Create a new empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with string content
    pub fn with_file<P: AsRef<Path>>(self, path: P, content: &str) -> Self {
        self.add_file(path, content.as_bytes());
        self
    }

    /// Add or update a file
    pub fn add_file<P: AsRef<Path>>(&self, path: P, content: &[u8]) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(path.as_ref().to_path_buf(), content.to_vec());
        }
    }

    /// Make reads of `path` fail with a permission error.
    pub fn with_unreadable<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.unreadable.insert(path.as_ref().to_path_buf());
        self
    }

    /// Make every walk fail with `message`.
    pub fn with_walk_error(mut self, message: &str) -> Self {
        self.walk_error = Some(message.to_string());
        self
    }

    /// Get a copy of a file's content
    pub fn get_file<P: AsRef<Path>>(&self, path: P) -> Option<Vec<u8>> {
        self.files
            .lock()
            .ok()
            .and_then(|files| files.get(path.as_ref()).cloned())
    }

    /// Get the number of files
    pub fn len(&self) -> usize {
        self.files.lock().map(|files| files.len()).unwrap_or(0)
    }

    /// Check if filesystem is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Filesystem for MemoryFS {
    fn exists(&self, path: &Path) -> bool {
        let Ok(files) = self.files.lock() else {
            return false;
        };
        files.contains_key(path) || files.keys().any(|file| file.starts_with(path))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        if self.unreadable.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }
        self.get_file(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        self.add_file(path, content);
        Ok(())
    }

    fn walk(&self, root: &Path) -> io::Result<Vec<WalkEntry>> {
        if let Some(message) = &self.walk_error {
            return Err(io::Error::other(message.clone()));
        }
        let files = self
            .files
            .lock()
            .map_err(|_| io::Error::other("memory filesystem lock poisoned"))?;

        let mut dirs: HashSet<PathBuf> = HashSet::new();
        let mut entries = Vec::new();
        for file in files.keys().filter(|file| file.starts_with(root)) {
            entries.push(WalkEntry::new(file.clone(), false));
            for ancestor in file.ancestors().skip(1) {
                if !ancestor.starts_with(root) {
                    break;
                }
                if dirs.insert(ancestor.to_path_buf()) {
                    entries.push(WalkEntry::new(ancestor.to_path_buf(), true));
                }
            }
        }
        Ok(entries)
    }
}
