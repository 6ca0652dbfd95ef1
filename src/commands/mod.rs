//! Subcommand entry points

pub mod build;
pub mod dev;

use std::path::Path;

use anyhow::Result;
use civetman::config::{Config, ConfigWarning};

/// Load `civetman.toml` (plus env overrides) from the project root.
pub fn load_config(root: &Path) -> Result<(Config, Vec<ConfigWarning>)> {
    Ok(Config::load_for_root(root)?)
}
