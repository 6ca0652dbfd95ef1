//! Watch Use Case implementation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::build::BuildExecutor;
use crate::application::discover_sources;
use crate::application::side_files::SideFiles;
use crate::domain::ports::Transpiler;
use crate::domain::value_objects::ExcludePatterns;
use crate::error::{CivetmanError, CivetmanResult};
use crate::infrastructure::fs::LocalFs;

use super::event::{WatchEvent, WatchOptions};
use super::normalize::normalize_event;
use super::session::WatchSession;

/// Longest time the loop blocks before re-checking the shutdown flag
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Watch Use Case
///
/// Orchestrates the initial build and continuous rebuilding.
/// This is the main entry point for the `civetman dev` command.
pub struct WatchUseCase {
    options: WatchOptions,
}

impl WatchUseCase {
    /// Create a new WatchUseCase
    pub fn new(options: WatchOptions) -> Self {
        Self { options }
    }

    /// Start watching (blocking)
    ///
    /// This method blocks until the running flag is set to false.
    /// Use the callback to receive events.
    pub fn start<T, F>(
        &self,
        transpiler: T,
        running: Arc<AtomicBool>,
        on_event: F,
    ) -> CivetmanResult<()>
    where
        T: Transpiler,
        F: Fn(WatchEvent),
    {
        // notify reports canonical paths; match them against a canonical root
        let root = self
            .options
            .root
            .canonicalize()
            .map_err(|_| CivetmanError::RootNotFound {
                path: self.options.root.clone(),
            })?;

        let excludes = ExcludePatterns::from_patterns(&root, &self.options.excludes)?;
        let sources = discover_sources(&root, &excludes)?;

        on_event(WatchEvent::WatchStarted {
            root: root.display().to_string(),
            sources: sources.len(),
        });

        let executor =
            BuildExecutor::new(root.clone(), self.options.mode, transpiler, LocalFs::new());
        let side_files = SideFiles::new(&root, self.options.mode, self.options.debounce);
        let mut session = WatchSession::new(executor, side_files);
        session.start(sources, Instant::now(), &on_event);

        // Set up file watcher
        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                let _ = tx.send(res);
            },
            Config::default(),
        )
        .map_err(|e| CivetmanError::Watcher(e.to_string()))?;

        watcher
            .watch(&root, RecursiveMode::Recursive)
            .map_err(|e| CivetmanError::Watcher(e.to_string()))?;

        while running.load(Ordering::SeqCst) {
            let wait = session
                .next_deadline()
                .map(|deadline| deadline.saturating_duration_since(Instant::now()))
                .map_or(POLL_INTERVAL, |until| until.min(POLL_INTERVAL));

            match rx.recv_timeout(wait) {
                Ok(Ok(event)) => {
                    for source_event in normalize_event(&event, &root, &excludes) {
                        session.handle(source_event, Instant::now(), &on_event);
                    }
                }
                Ok(Err(e)) => on_event(WatchEvent::Error {
                    message: format!("watcher error: {}", e),
                }),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            session.tick(Instant::now(), &on_event);
        }

        drop(watcher);
        session.close(&on_event);
        Ok(())
    }
}
