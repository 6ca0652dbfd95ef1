//! Watch session state machine
//!
//! Owns the live source and output sets. Every filesystem event goes through
//! [`WatchSession::handle`] one at a time, so events for the same path are
//! applied in arrival order.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::application::build::{BuildExecutor, BuildTrigger};
use crate::application::side_files::{SideFiles, SyncReport};
use crate::domain::ports::{FileSystem, Transpiler};
use crate::domain::value_objects::{to_slash, OutputExt};
use crate::error::{BuildError, SideFileError};

use super::event::{SourceEvent, SourceEventKind, WatchEvent};

/// Lifecycle of a watch session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Watching,
    Closing,
    Closed,
}

/// What a single event did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Not a tracked source (or not a source at all); nothing changed
    Ignored,
    Built,
    Failed,
    Removed,
}

pub struct WatchSession<T: Transpiler, F: FileSystem> {
    executor: BuildExecutor<T, F>,
    side_files: SideFiles,
    sources: BTreeSet<PathBuf>,
    outputs: BTreeSet<PathBuf>,
    state: SessionState,
}

impl<T: Transpiler, F: FileSystem> WatchSession<T, F> {
    pub fn new(executor: BuildExecutor<T, F>, side_files: SideFiles) -> Self {
        Self {
            executor,
            side_files,
            sources: BTreeSet::new(),
            outputs: BTreeSet::new(),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn sources(&self) -> &BTreeSet<PathBuf> {
        &self.sources
    }

    pub fn outputs(&self) -> &BTreeSet<PathBuf> {
        &self.outputs
    }

    /// Earliest pending side-file deadline, for sizing the loop's wait
    pub fn next_deadline(&self) -> Option<Instant> {
        self.side_files.next_deadline()
    }

    /// Build every initial source and move to `Watching`.
    ///
    /// A source that fails here stays tracked so a later change can fix it.
    pub fn start(&mut self, initial: Vec<PathBuf>, now: Instant, emit: &impl Fn(WatchEvent)) {
        if self.state != SessionState::Idle {
            return;
        }

        let mut built = 0;
        let mut failed = 0;
        for source in initial {
            match self.executor.build(&source) {
                Ok(output) => {
                    emit(built_event(&source, &output, BuildTrigger::Initial));
                    self.outputs.insert(output);
                    built += 1;
                }
                Err(e) => {
                    emit(failed_event(&e));
                    failed += 1;
                }
            }
            self.sources.insert(source);
        }

        emit(WatchEvent::InitialBuildComplete { built, failed });
        self.side_files.request(&self.outputs, now);
        self.state = SessionState::Watching;
    }

    /// Apply one filesystem event.
    ///
    /// An unlink of a path that is not a tracked source is treated as a
    /// removed directory: every tracked source below it is unlinked.
    pub fn handle(
        &mut self,
        event: SourceEvent,
        now: Instant,
        emit: &impl Fn(WatchEvent),
    ) -> EventOutcome {
        if self.state != SessionState::Watching {
            return EventOutcome::Ignored;
        }

        let tracked = self.sources.contains(&event.path);
        if event.kind == SourceEventKind::Unlink && !tracked {
            return self.on_unlink_tree(&event.path, now, emit);
        }
        if !OutputExt::is_source(&event.path) {
            return EventOutcome::Ignored;
        }

        match event.kind {
            SourceEventKind::Add if !tracked => self.on_add(event.path, now, emit),
            SourceEventKind::Add | SourceEventKind::Change if tracked => {
                self.on_change(&event.path, now, emit)
            }
            SourceEventKind::Unlink if tracked => self.on_unlink(&event.path, now, emit),
            _ => EventOutcome::Ignored,
        }
    }

    /// Run side-file rewrites whose quiet period has elapsed.
    pub fn tick(&mut self, now: Instant, emit: &impl Fn(WatchEvent)) {
        let reports = self.side_files.poll(self.executor.fs(), now);
        report_syncs(reports, emit);
    }

    /// Flush pending rewrites and move to `Closed`.
    pub fn close(&mut self, emit: &impl Fn(WatchEvent)) {
        if self.state == SessionState::Closed {
            return;
        }
        self.state = SessionState::Closing;
        let reports = self.side_files.flush(self.executor.fs());
        report_syncs(reports, emit);
        self.state = SessionState::Closed;
        emit(WatchEvent::Shutdown);
    }

    fn on_add(
        &mut self,
        source: PathBuf,
        now: Instant,
        emit: &impl Fn(WatchEvent),
    ) -> EventOutcome {
        match self.executor.build(&source) {
            Ok(output) => {
                emit(built_event(&source, &output, BuildTrigger::Add));
                self.sources.insert(source);
                self.outputs.insert(output);
                self.side_files.request(&self.outputs, now);
                EventOutcome::Built
            }
            Err(e) => {
                emit(failed_event(&e));
                EventOutcome::Failed
            }
        }
    }

    fn on_change(
        &mut self,
        source: &Path,
        now: Instant,
        emit: &impl Fn(WatchEvent),
    ) -> EventOutcome {
        match self.executor.build(source) {
            Ok(output) => {
                emit(built_event(source, &output, BuildTrigger::Change));
                // first success for a source that failed at startup
                if self.outputs.insert(output) {
                    self.side_files.request(&self.outputs, now);
                }
                EventOutcome::Built
            }
            Err(e) => {
                emit(failed_event(&e));
                EventOutcome::Failed
            }
        }
    }

    fn on_unlink(
        &mut self,
        source: &Path,
        now: Instant,
        emit: &impl Fn(WatchEvent),
    ) -> EventOutcome {
        self.sources.remove(source);
        let output = self.executor.output_for(source);
        self.outputs.remove(&output);

        match self.executor.remove_output(&output) {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {}
            Err(e) => emit(WatchEvent::Warning {
                message: format!("could not delete {}: {}", to_slash(&output), e),
            }),
        }

        emit(WatchEvent::FileRemoved {
            source: to_slash(source),
            output: to_slash(&output),
        });
        self.side_files.request(&self.outputs, now);
        EventOutcome::Removed
    }

    fn on_unlink_tree(
        &mut self,
        dir: &Path,
        now: Instant,
        emit: &impl Fn(WatchEvent),
    ) -> EventOutcome {
        if dir.as_os_str().is_empty() {
            return EventOutcome::Ignored;
        }
        let below: Vec<PathBuf> = self
            .sources
            .iter()
            .filter(|source| source.starts_with(dir))
            .cloned()
            .collect();
        if below.is_empty() {
            return EventOutcome::Ignored;
        }
        for source in &below {
            self.on_unlink(source, now, emit);
        }
        EventOutcome::Removed
    }
}

fn built_event(source: &Path, output: &Path, trigger: BuildTrigger) -> WatchEvent {
    WatchEvent::FileBuilt {
        source: to_slash(source),
        output: to_slash(output),
        trigger,
    }
}

fn failed_event(err: &BuildError) -> WatchEvent {
    WatchEvent::FileFailed {
        source: to_slash(err.path()),
        stage: err.stage().to_string(),
        message: err.to_string(),
    }
}

fn report_syncs(reports: Vec<Result<SyncReport, SideFileError>>, emit: &impl Fn(WatchEvent)) {
    for report in reports {
        match report {
            Ok(report) => emit(WatchEvent::SideFileSynced {
                file: report.kind.relative_path().to_string(),
                entries: report.entries,
            }),
            Err(e @ SideFileError::Parse { .. }) => emit(WatchEvent::Warning {
                message: e.to_string(),
            }),
            Err(e) => emit(WatchEvent::Error {
                message: e.to_string(),
            }),
        }
    }
}
