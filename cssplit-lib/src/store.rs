//! Filesystem access used by the splitter.
//!
//! Every call takes an explicit path; the process working directory is
//! never changed.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SplitError;

pub trait FileStore {
    fn exists(&self, path: &Path) -> bool;

    fn read_all(&self, path: &Path) -> Result<String, SplitError>;

    fn create_dir_if_absent(&self, path: &Path) -> Result<(), SplitError>;

    /// Delete the files directly inside `path`. Subdirectories are kept.
    fn clear_dir(&self, path: &Path) -> Result<(), SplitError>;

    fn write_all(&self, path: &Path, contents: &str) -> Result<(), SplitError>;
}

/// [`FileStore`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl FileStore for FsStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_all(&self, path: &Path) -> Result<String, SplitError> {
        fs::read_to_string(path).map_err(|e| SplitError::io(path, e))
    }

    fn create_dir_if_absent(&self, path: &Path) -> Result<(), SplitError> {
        fs::create_dir_all(path).map_err(|e| SplitError::io(path, e))
    }

    fn clear_dir(&self, path: &Path) -> Result<(), SplitError> {
        let entries = fs::read_dir(path).map_err(|e| SplitError::io(path, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| SplitError::io(path, e))?;
            let file_type = entry.file_type().map_err(|e| SplitError::io(entry.path(), e))?;
            if !file_type.is_dir() {
                fs::remove_file(entry.path()).map_err(|e| SplitError::io(entry.path(), e))?;
            }
        }
        Ok(())
    }

    fn write_all(&self, path: &Path, contents: &str) -> Result<(), SplitError> {
        fs::write(path, contents).map_err(|e| SplitError::io(path, e))
    }
}

/// In-memory [`FileStore`]; directories are implied by the files under them
/// unless created explicitly.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RefCell<BTreeMap<PathBuf, String>>,
    dirs: RefCell<Vec<PathBuf>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.borrow_mut().insert(path.into(), contents.into());
        self
    }

    /// Contents of `path`, if it was written.
    pub fn file(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Names of the files directly inside `dir`, sorted.
    pub fn list(&self, dir: &Path) -> Vec<String> {
        self.files
            .borrow()
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect()
    }
}

impl FileStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
            || self.dirs.borrow().iter().any(|dir| dir == path)
            || self.files.borrow().keys().any(|file| file.starts_with(path))
    }

    fn read_all(&self, path: &Path) -> Result<String, SplitError> {
        self.file(path).ok_or_else(|| {
            SplitError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            )
        })
    }

    fn create_dir_if_absent(&self, path: &Path) -> Result<(), SplitError> {
        if !self.exists(path) {
            self.dirs.borrow_mut().push(path.to_path_buf());
        }
        Ok(())
    }

    fn clear_dir(&self, path: &Path) -> Result<(), SplitError> {
        self.files
            .borrow_mut()
            .retain(|file, _| file.parent() != Some(path));
        Ok(())
    }

    fn write_all(&self, path: &Path, contents: &str) -> Result<(), SplitError> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_clears_only_direct_children() {
        let store = MemoryStore::new()
            .with_file("/site/ie9/old.css", "x")
            .with_file("/site/ie9/nested/keep.css", "y")
            .with_file("/site/main.less", "z");

        store.clear_dir(Path::new("/site/ie9")).unwrap();

        assert_eq!(store.list(Path::new("/site/ie9")), Vec::<String>::new());
        assert!(store.exists(Path::new("/site/ie9/nested/keep.css")));
        assert!(store.exists(Path::new("/site/main.less")));
    }

    #[test]
    fn memory_store_reports_missing_files() {
        let store = MemoryStore::new();
        assert!(!store.exists(Path::new("/nowhere.css")));
        assert!(matches!(
            store.read_all(Path::new("/nowhere.css")),
            Err(SplitError::Io { .. })
        ));
        store.create_dir_if_absent(Path::new("/out")).unwrap();
        assert!(store.exists(Path::new("/out")));
    }

    #[test]
    fn fs_store_clears_files_but_keeps_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("ie9");
        let store = FsStore;

        store.create_dir_if_absent(&out).unwrap();
        store.write_all(&out.join("stale.css"), "a{}").unwrap();
        fs::create_dir(out.join("assets")).unwrap();

        store.clear_dir(&out).unwrap();

        assert!(!out.join("stale.css").exists());
        assert!(out.join("assets").is_dir());
        assert!(store.read_all(&dir.path().join("missing.css")).is_err());
    }
}
