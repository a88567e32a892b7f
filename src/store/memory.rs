use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::store::{DirEntry, FileStore};

/// In-memory store for testing without touching disk.
///
/// Directories are implied by file paths; `add_dir` can register an
/// empty directory explicitly.
pub struct MemoryStore {
    files: Mutex<BTreeMap<PathBuf, String>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        MemoryStore {
            files: Mutex::new(BTreeMap::new()),
            dirs: Mutex::new(BTreeSet::new()),
        }
    }

    /// Add a file with the given contents, implying its parent directories.
    pub fn add_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        let path = path.into();
        self.register_parents(&path);
        self.files.lock().unwrap().insert(path, contents.into());
    }

    /// Register a directory, empty or not.
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.register_parents(&path);
        self.dirs.lock().unwrap().insert(path);
    }

    fn register_parents(&self, path: &Path) {
        let mut dirs = self.dirs.lock().unwrap();
        let mut current = path.parent();
        while let Some(parent) = current {
            if !parent.as_os_str().is_empty() {
                dirs.insert(parent.to_path_buf());
            }
            current = parent.parent();
        }
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such file or directory: {}", path.display()),
        )
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStore for MemoryStore {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let files = self.files.lock().unwrap();
        let dirs = self.dirs.lock().unwrap();

        if !dirs.contains(path) {
            return Err(Self::not_found(path));
        }

        let mut entries = Vec::new();

        for file in files.keys() {
            if file.parent() == Some(path) {
                entries.push(DirEntry {
                    name: file.file_name().unwrap().to_string_lossy().into_owned(),
                    is_dir: false,
                });
            }
        }

        for dir in dirs.iter() {
            if dir.parent() == Some(path) {
                entries.push(DirEntry {
                    name: dir.file_name().unwrap().to_string_lossy().into_owned(),
                    is_dir: true,
                });
            }
        }

        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| Self::not_found(path))
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.add_file(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}
