//! Side-file synchronizers

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::domain::ports::FileSystem;
use crate::domain::services::{render_editor_exclude, render_ignore_list, SideFileParseError};
use crate::domain::value_objects::BuildMode;
use crate::error::SideFileError;

use super::Debouncer;

/// The two side files Civetman maintains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideFileKind {
    /// `.gitignore` at the project root
    IgnoreList,
    /// `.vscode/settings.json`, key `files.exclude`
    EditorExclude,
}

impl SideFileKind {
    /// Location relative to the project root
    pub fn relative_path(&self) -> &'static str {
        match self {
            SideFileKind::IgnoreList => ".gitignore",
            SideFileKind::EditorExclude => ".vscode/settings.json",
        }
    }

    pub fn render(
        &self,
        existing: &str,
        outputs: &BTreeSet<PathBuf>,
    ) -> Result<String, SideFileParseError> {
        match self {
            SideFileKind::IgnoreList => Ok(render_ignore_list(existing, outputs)),
            SideFileKind::EditorExclude => render_editor_exclude(existing, outputs),
        }
    }
}

/// Outcome of one executed rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub kind: SideFileKind,
    pub path: PathBuf,
    /// Number of outputs listed in the managed region
    pub entries: usize,
}

/// One debounced side file
#[derive(Debug)]
pub struct SideFileSynchronizer {
    kind: SideFileKind,
    path: PathBuf,
    enabled: bool,
    pending: Debouncer<BTreeSet<PathBuf>>,
}

impl SideFileSynchronizer {
    pub fn new(kind: SideFileKind, root: &Path, enabled: bool, quiet: Duration) -> Self {
        Self {
            kind,
            path: root.join(kind.relative_path()),
            enabled,
            pending: Debouncer::new(quiet),
        }
    }

    pub fn kind(&self) -> SideFileKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Schedule a rewrite with `outputs`. Replaces any earlier pending set.
    pub fn request(&mut self, outputs: &BTreeSet<PathBuf>, now: Instant) {
        if self.enabled {
            self.pending.push(outputs.clone(), now);
        }
    }

    /// Run the pending rewrite if its quiet period has elapsed.
    pub fn poll<F: FileSystem>(
        &mut self,
        fs: &F,
        now: Instant,
    ) -> Option<Result<SyncReport, SideFileError>> {
        let outputs = self.pending.poll(now)?;
        Some(self.write_now(fs, &outputs))
    }

    /// Run the pending rewrite immediately.
    pub fn flush<F: FileSystem>(&mut self, fs: &F) -> Option<Result<SyncReport, SideFileError>> {
        let outputs = self.pending.take()?;
        Some(self.write_now(fs, &outputs))
    }

    pub fn has_pending(&self) -> bool {
        self.pending.has_pending()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.deadline()
    }

    /// Rewrite the side file with exactly `outputs` in its managed region.
    ///
    /// A missing file (or parent directory) is created; content before the
    /// marker is kept. Exactly one write per call, none when the existing
    /// content cannot be parsed.
    pub fn write_now<F: FileSystem>(
        &self,
        fs: &F,
        outputs: &BTreeSet<PathBuf>,
    ) -> Result<SyncReport, SideFileError> {
        if let Some(parent) = self.path.parent() {
            fs.create_dir_all(parent)
                .map_err(|cause| SideFileError::Prepare {
                    path: self.path.clone(),
                    cause,
                })?;
        }

        let existing = match fs.read(&self.path) {
            Ok(content) => content,
            Err(e) if e.is_not_found() => String::new(),
            Err(cause) => {
                return Err(SideFileError::Read {
                    path: self.path.clone(),
                    cause,
                })
            }
        };

        let rendered = self
            .kind
            .render(&existing, outputs)
            .map_err(|cause| SideFileError::Parse {
                path: self.path.clone(),
                cause,
            })?;
        fs.write(&self.path, &rendered)
            .map_err(|cause| SideFileError::Write {
                path: self.path.clone(),
                cause,
            })?;

        Ok(SyncReport {
            kind: self.kind,
            path: self.path.clone(),
            entries: outputs.len(),
        })
    }
}

/// Both synchronizers, configured from the build mode
#[derive(Debug)]
pub struct SideFiles {
    synchronizers: [SideFileSynchronizer; 2],
}

impl SideFiles {
    pub fn new(root: &Path, mode: BuildMode, quiet: Duration) -> Self {
        Self {
            synchronizers: [
                SideFileSynchronizer::new(SideFileKind::IgnoreList, root, mode.syncs_git(), quiet),
                SideFileSynchronizer::new(
                    SideFileKind::EditorExclude,
                    root,
                    mode.syncs_vscode(),
                    quiet,
                ),
            ],
        }
    }

    pub fn request(&mut self, outputs: &BTreeSet<PathBuf>, now: Instant) {
        for sync in &mut self.synchronizers {
            sync.request(outputs, now);
        }
    }

    /// Rewrites whose quiet period has elapsed
    pub fn poll<F: FileSystem>(
        &mut self,
        fs: &F,
        now: Instant,
    ) -> Vec<Result<SyncReport, SideFileError>> {
        self.synchronizers
            .iter_mut()
            .filter_map(|sync| sync.poll(fs, now))
            .collect()
    }

    /// Every pending rewrite, now
    pub fn flush<F: FileSystem>(&mut self, fs: &F) -> Vec<Result<SyncReport, SideFileError>> {
        self.synchronizers
            .iter_mut()
            .filter_map(|sync| sync.flush(fs))
            .collect()
    }

    pub fn has_pending(&self) -> bool {
        self.synchronizers.iter().any(|sync| sync.has_pending())
    }

    /// Earliest instant at which a pending rewrite becomes due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.synchronizers
            .iter()
            .filter_map(|sync| sync.deadline())
            .min()
    }
}
