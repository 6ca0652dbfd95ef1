//! Application Layer
//!
//! Use cases that orchestrate the build flow.
//! This layer:
//! - Depends on Domain layer (value objects, services, ports)
//! - Does NOT contain path or side-file rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `BuildUseCase` - One-shot batch build of every discovered source
//! - `WatchUseCase` - Continuous build driven by filesystem events
//!
//! ## Services
//!
//! - `discover_sources` - Source enumeration at startup and for new directories
//! - `BuildExecutor` - One source → output build
//! - `SideFiles` - Debounced `.gitignore` / VS Code exclude synchronizers

pub mod build;
pub mod discovery;
pub mod side_files;
pub mod watch;

#[cfg(test)]
pub(crate) mod test_support;

pub use build::{
    BuildEvent, BuildExecutor, BuildOptions, BuildResult, BuildTrigger, BuildUseCase,
};
pub use discovery::{discover_sources, discover_sources_under};
pub use side_files::{Debouncer, SideFileKind, SideFileSynchronizer, SideFiles, SyncReport};
pub use watch::{
    normalize_event, EventOutcome, SessionState, SourceEvent, SourceEventKind, WatchEvent,
    WatchOptions, WatchSession, WatchUseCase,
};
