//! Side-file synchronization
//!
//! Keeps `.gitignore` and `.vscode/settings.json` listing the current output
//! set. Rewrites are debounced so a burst of builds ends in one write per file.

mod debounce;
mod synchronizer;

pub use debounce::Debouncer;
pub use synchronizer::{SideFileKind, SideFileSynchronizer, SideFiles, SyncReport};
