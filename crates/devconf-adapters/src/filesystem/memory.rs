//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use devconf_core::{
    application::{ApplicationError, ports::Filesystem},
    error::DevconfResult,
};

/// In-memory filesystem. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
    executables: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// A file's bytes (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// A file's content as UTF-8 (testing helper).
    pub fn read_to_string(&self, path: &Path) -> Option<String> {
        self.read_file(path)
            .and_then(|bytes| String::from_utf8(bytes).ok())
    }

    pub fn is_executable(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.executables.contains(path))
            .unwrap_or(false)
    }

    /// All file paths, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self
            .inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default();
        files.sort();
        files
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> DevconfResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> DevconfResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let orphan = path
            .parent()
            .is_some_and(|p| !p.as_os_str().is_empty() && !inner.directories.contains(p));
        if orphan {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Parent directory does not exist".into(),
            }
            .into());
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> DevconfResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }
}
