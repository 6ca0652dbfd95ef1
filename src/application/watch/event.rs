//! Watch event types and options

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::application::build::BuildTrigger;
use crate::config::{Config, DEFAULT_DEBOUNCE_MS};
use crate::domain::value_objects::{BuildMode, DEFAULT_EXCLUDES};

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Project root to watch
    pub root: PathBuf,
    /// Output extension and side-file switches
    pub mode: BuildMode,
    /// Gitignore-style patterns never treated as sources
    pub excludes: Vec<String>,
    /// Quiet period before side files are rewritten
    pub debounce: Duration,
}

impl WatchOptions {
    /// Create new watch options with minimal required fields
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mode: BuildMode::default(),
            excludes: DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }

    /// Take excludes and debounce from the config
    pub fn with_config(mut self, config: &Config) -> Self {
        self.excludes = config.discovery.exclude.clone();
        self.debounce = config.debounce();
        self
    }

    /// Set the build mode
    pub fn with_mode(mut self, mode: BuildMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the side-file quiet period
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

/// Kind of filesystem change for a source path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEventKind {
    Add,
    Change,
    Unlink,
}

/// One normalized filesystem change, root-relative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEvent {
    pub kind: SourceEventKind,
    pub path: PathBuf,
}

impl SourceEvent {
    pub fn add(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: SourceEventKind::Add,
            path: path.into(),
        }
    }

    pub fn change(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: SourceEventKind::Change,
            path: path.into(),
        }
    }

    pub fn unlink(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: SourceEventKind::Unlink,
            path: path.into(),
        }
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Initial scan finished, watcher about to start
    WatchStarted { root: String, sources: usize },
    /// A source was compiled and its output written
    FileBuilt {
        source: String,
        output: String,
        trigger: BuildTrigger,
    },
    /// A source failed to build; the session keeps going
    FileFailed {
        source: String,
        stage: String,
        message: String,
    },
    /// A tracked source disappeared and its output was dropped
    FileRemoved { source: String, output: String },
    /// Every source found at startup has been attempted
    InitialBuildComplete { built: usize, failed: usize },
    /// A side file was rewritten
    SideFileSynced { file: String, entries: usize },
    /// Something went wrong but nothing was lost
    Warning { message: String },
    /// Error occurred
    Error { message: String },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    /// Convert to JSON string with "command": "dev" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("dev"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
