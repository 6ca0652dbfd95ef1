//! Build Executor
//!
//! Turns one source file into one output file: read, transpile, stamp the
//! provenance header, write. Paths handed in and out are root-relative.

use std::path::{Path, PathBuf};

use crate::domain::ports::{FileSystem, FsResult, Transpiler};
use crate::domain::services::{output_path, with_provenance_header};
use crate::domain::value_objects::BuildMode;
use crate::error::BuildError;

pub struct BuildExecutor<T: Transpiler, F: FileSystem> {
    root: PathBuf,
    mode: BuildMode,
    transpiler: T,
    fs: F,
}

impl<T: Transpiler, F: FileSystem> BuildExecutor<T, F> {
    pub fn new(root: impl Into<PathBuf>, mode: BuildMode, transpiler: T, fs: F) -> Self {
        Self {
            root: root.into(),
            mode,
            transpiler,
            fs,
        }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Output path for `source` under the current mode
    pub fn output_for(&self, source: &Path) -> PathBuf {
        output_path(source, self.mode.ext())
    }

    /// Build `source` and return the output path once it is on disk.
    ///
    /// The transpiler runs before anything is written, so a rejected source
    /// leaves the previous output untouched.
    pub fn build(&self, source: &Path) -> Result<PathBuf, BuildError> {
        let text = self
            .fs
            .read(&self.root.join(source))
            .map_err(|cause| BuildError::Read {
                path: source.to_path_buf(),
                cause,
            })?;

        let compiled =
            self.transpiler
                .transpile(&text, source)
                .map_err(|cause| BuildError::Transpile {
                    path: source.to_path_buf(),
                    cause,
                })?;

        let output = self.output_for(source);
        let content = with_provenance_header(source, &compiled);
        self.fs
            .write(&self.root.join(&output), &content)
            .map_err(|cause| BuildError::Write {
                path: source.to_path_buf(),
                output: output.clone(),
                cause,
            })?;

        Ok(output)
    }

    /// Delete a previously generated output
    pub fn remove_output(&self, output: &Path) -> FsResult<()> {
        self.fs.remove(&self.root.join(output))
    }
}
