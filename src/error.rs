//! Error types for Civetman
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::ports::{FsError, TranspileError};
use crate::domain::services::SideFileParseError;
use crate::domain::value_objects::ExcludeError;

/// Result type alias for Civetman operations
pub type CivetmanResult<T> = Result<T, CivetmanError>;

/// Main error type for Civetman operations
#[derive(Error, Debug)]
pub enum CivetmanError {
    /// Source discovery failed (fatal at startup)
    #[error("failed to discover source files under {root}: {message}")]
    Discovery { root: PathBuf, message: String },

    /// Project root does not exist or is not a directory
    #[error("project root not found: {path}")]
    RootNotFound { path: PathBuf },

    /// `civetman.toml` could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// The `discovery.exclude` list could not be compiled
    #[error("invalid exclude configuration: {0}")]
    Exclude(#[from] ExcludeError),

    /// The filesystem watcher could not be started
    #[error("failed to start file watcher: {0}")]
    Watcher(String),

    /// A single source file failed to build
    #[error(transparent)]
    Build(#[from] BuildError),

    /// A side file could not be synchronized
    #[error(transparent)]
    SideFile(#[from] SideFileError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of one source → output build.
///
/// Every variant carries the source path so the failure can be reported
/// inline against the file that caused it.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("cannot read {path}: {cause}")]
    Read { path: PathBuf, cause: FsError },

    #[error("cannot compile {path}: {cause}")]
    Transpile { path: PathBuf, cause: TranspileError },

    #[error("cannot write {output} (from {path}): {cause}")]
    Write {
        path: PathBuf,
        output: PathBuf,
        cause: FsError,
    },
}

impl BuildError {
    /// Source path the build was attempted for
    pub fn path(&self) -> &Path {
        match self {
            BuildError::Read { path, .. }
            | BuildError::Transpile { path, .. }
            | BuildError::Write { path, .. } => path,
        }
    }

    /// Stage of the build that failed, as reported in events
    pub fn stage(&self) -> &'static str {
        match self {
            BuildError::Read { .. } => "read",
            BuildError::Transpile { .. } => "transpile",
            BuildError::Write { .. } => "write",
        }
    }
}

/// Failure while rewriting a side file (`.gitignore`, `.vscode/settings.json`).
#[derive(Error, Debug)]
pub enum SideFileError {
    #[error("cannot prepare {path}: {cause}")]
    Prepare { path: PathBuf, cause: FsError },

    #[error("cannot read {path}: {cause}")]
    Read { path: PathBuf, cause: FsError },

    #[error("cannot write {path}: {cause}")]
    Write { path: PathBuf, cause: FsError },

    /// Existing content could not be merged; the file was left as it was
    #[error("left {path} unchanged, cannot parse it: {cause}")]
    Parse {
        path: PathBuf,
        cause: SideFileParseError,
    },
}

impl SideFileError {
    /// Side file the failure belongs to
    pub fn path(&self) -> &Path {
        match self {
            SideFileError::Prepare { path, .. }
            | SideFileError::Read { path, .. }
            | SideFileError::Write { path, .. }
            | SideFileError::Parse { path, .. } => path,
        }
    }
}
