//! Watch Use Case
//!
//! Continuous rebuilding for `civetman dev`. It orchestrates:
//! - File system monitoring (via `notify` crate)
//! - Event normalization (rename/save quirks → add/change/unlink)
//! - Per-file rebuilds and output removal (`WatchSession`)
//! - Debounced side-file rewrites
//!
//! ## Architecture
//!
//! - `WatchUseCase` - Owns the watcher and the event loop
//! - `WatchSession` - State machine over the source and output sets
//! - `WatchEvent` - Events emitted during watch operation
//!
//! ## Usage
//!
//! ```ignore
//! let use_case = WatchUseCase::new(WatchOptions::new(root).with_config(&config));
//! use_case.start(transpiler, running, |event| { ... })?;
//! ```

mod event;
mod normalize;
mod session;
mod use_case;


pub use event::{SourceEvent, SourceEventKind, WatchEvent, WatchOptions};
pub use normalize::normalize_event;
pub use session::{EventOutcome, SessionState, WatchSession};
pub use use_case::WatchUseCase;
