//! Configuration module for Civetman
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (CIVETMAN_*)
//! 3. Project config (`civetman.toml` in the project root)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::ConfigWarning;
pub use types::{
    BuildConfig, CompilerConfig, Config, DiscoveryConfig, ModeOverrides, SyncConfig,
    CONFIG_FILE_NAME, DEFAULT_DEBOUNCE_MS,
};
