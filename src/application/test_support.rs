//! In-memory ports shared by the application-layer tests

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::ports::{FileSystem, FsError, FsResult, TranspileError, Transpiler};

/// Marker that makes [`FakeTranspiler`] reject a source
pub const SYNTAX_ERROR: &str = "@@syntax error@@";

/// Transpiler that prefixes the source with a comment and rejects sources
/// containing [`SYNTAX_ERROR`].
#[derive(Default)]
pub struct FakeTranspiler {
    calls: Cell<usize>,
}

impl FakeTranspiler {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Transpiler for FakeTranspiler {
    fn transpile(&self, source: &str, filename: &Path) -> Result<String, TranspileError> {
        self.calls.set(self.calls.get() + 1);
        if source.contains(SYNTAX_ERROR) {
            return Err(TranspileError::Rejected {
                message: format!("{}: unexpected token", filename.display()),
            });
        }
        Ok(format!("/* ts */\n{}", source))
    }
}

/// File system held in a map; records every write
#[derive(Default)]
pub struct MemoryFs {
    files: RefCell<BTreeMap<PathBuf, String>>,
    writes: RefCell<Vec<PathBuf>>,
    read_only: RefCell<Vec<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.put(path, content);
        self
    }

    pub fn put(&self, path: impl Into<PathBuf>, content: &str) {
        self.files
            .borrow_mut()
            .insert(path.into(), content.to_string());
    }

    pub fn delete(&self, path: impl AsRef<Path>) {
        self.files.borrow_mut().remove(path.as_ref());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Make writes and removes of `path` fail with permission denied
    pub fn deny(&self, path: impl Into<PathBuf>) {
        self.read_only.borrow_mut().push(path.into());
    }

    /// Number of writes to `path` so far
    pub fn writes_to(&self, path: impl AsRef<Path>) -> usize {
        self.writes
            .borrow()
            .iter()
            .filter(|p| p.as_path() == path.as_ref())
            .count()
    }

    fn is_denied(&self, path: &Path) -> bool {
        self.read_only.borrow().iter().any(|p| p == path)
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        if self.is_denied(path) {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        self.writes.borrow_mut().push(path.to_path_buf());
        self.put(path, content);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        if self.is_denied(path) {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        self.files
            .borrow_mut()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn create_dir_all(&self, _path: &Path) -> FsResult<()> {
        Ok(())
    }
}
