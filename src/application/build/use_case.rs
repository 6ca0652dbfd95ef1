//! Build Use Case implementation

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::application::discover_sources;
use crate::application::side_files::SideFiles;
use crate::domain::ports::{FileSystem, Transpiler};
use crate::domain::value_objects::{to_slash, BuildMode, ExcludePatterns, DEFAULT_EXCLUDES};
use crate::error::CivetmanResult;

use super::{BuildEvent, BuildExecutor};

/// Options for the build use case
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Project root; sources and outputs are relative to it
    pub root: PathBuf,
    /// Output extension and side-file switches
    pub mode: BuildMode,
    /// Gitignore-style patterns skipped during discovery
    pub excludes: Vec<String>,
}

impl BuildOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mode: BuildMode::default(),
            excludes: DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn with_mode(mut self, mode: BuildMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.excludes = excludes;
        self
    }
}

/// Result of a batch build
#[derive(Debug, Clone, Default)]
pub struct BuildResult {
    /// Sources that produced an output
    pub built: Vec<PathBuf>,
    /// Sources that failed, with the failure message
    pub failed: Vec<(PathBuf, String)>,
    /// Outputs listed in the side files
    pub outputs: BTreeSet<PathBuf>,
}

impl BuildResult {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Build Use Case
///
/// Discovers every source, builds them one after another and writes both
/// side files once at the end. Per-file failures are reported and counted,
/// never returned as errors.
pub struct BuildUseCase<T: Transpiler, F: FileSystem> {
    options: BuildOptions,
    executor: BuildExecutor<T, F>,
}

impl<T: Transpiler, F: FileSystem> BuildUseCase<T, F> {
    pub fn new(options: BuildOptions, transpiler: T, fs: F) -> Self {
        let executor = BuildExecutor::new(options.root.clone(), options.mode, transpiler, fs);
        Self { options, executor }
    }

    /// Run the batch build.
    ///
    /// Returns an error only if the exclude list is invalid or discovery fails.
    pub fn execute<E>(&self, on_event: E) -> CivetmanResult<BuildResult>
    where
        E: Fn(BuildEvent),
    {
        let root = &self.options.root;
        let excludes = ExcludePatterns::from_patterns(root, &self.options.excludes)?;
        let sources = discover_sources(root, &excludes)?;

        on_event(BuildEvent::BuildStarted {
            root: root.display().to_string(),
            sources: sources.len(),
        });

        let mut result = BuildResult::default();
        for source in sources {
            match self.executor.build(&source) {
                Ok(output) => {
                    on_event(BuildEvent::FileBuilt {
                        source: to_slash(&source),
                        output: to_slash(&output),
                    });
                    result.outputs.insert(output);
                    result.built.push(source);
                }
                Err(e) => {
                    on_event(BuildEvent::FileFailed {
                        source: to_slash(&source),
                        stage: e.stage().to_string(),
                        message: e.to_string(),
                    });
                    result.failed.push((source, e.to_string()));
                }
            }
        }

        let mut side_files = SideFiles::new(root, self.options.mode, Duration::ZERO);
        side_files.request(&result.outputs, Instant::now());
        for report in side_files.flush(self.executor.fs()) {
            match report {
                Ok(report) => on_event(BuildEvent::SideFileSynced {
                    file: report.kind.relative_path().to_string(),
                    entries: report.entries,
                }),
                Err(e) => on_event(BuildEvent::Warning {
                    message: e.to_string(),
                }),
            }
        }

        on_event(BuildEvent::BuildComplete {
            built: result.built.len(),
            failed: result.failed.len(),
        });

        Ok(result)
    }
}
