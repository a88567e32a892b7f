use std::fs;
use std::io;
use std::path::Path;

use crate::store::{DirEntry, FileStore};

/// Real filesystem implementation of [FileStore].
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskStore;

impl DiskStore {
    pub fn new() -> Self {
        DiskStore
    }
}

impl FileStore for DiskStore {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(path)? {
            let entry = entry?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.file_type()?.is_dir(),
            });
        }

        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
