//! Configuration type definitions

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{BuildMode, OutputExt, DEFAULT_EXCLUDES};
use crate::error::CivetmanResult;

use super::loader::{self, ConfigWarning};

/// Name of the project config file, looked up in the project root
pub const CONFIG_FILE_NAME: &str = "civetman.toml";

/// Quiet period for side-file rewrites when nothing is configured
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BuildConfig {
    /// Emit `.tsx` instead of `.ts`
    #[serde(default)]
    pub tsx: bool,
}

/// Side-file synchronization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Keep `.gitignore` in sync with generated files
    #[serde(default = "default_true")]
    pub git: bool,

    /// Keep `.vscode/settings.json` `files.exclude` in sync with generated files
    #[serde(default = "default_true")]
    pub vscode: bool,

    /// Quiet period before a side file is rewritten in watch mode
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            git: true,
            vscode: true,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Compiler process configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerConfig {
    #[serde(default = "default_compiler_command")]
    pub command: String,

    /// Extra arguments; `{file}` is replaced by the source path
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            command: default_compiler_command(),
            args: Vec::new(),
        }
    }
}

/// Source discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Gitignore-style patterns never treated as sources
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            exclude: default_excludes(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_compiler_command() -> String {
    "civet".to_string()
}

fn default_excludes() -> Vec<String> {
    DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect()
}

/// Flags given on the command line; `true` always wins over the config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeOverrides {
    pub tsx: bool,
    pub no_git: bool,
    pub no_vscode: bool,
}

/// Main configuration struct (`civetman.toml`)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub compiler: CompilerConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> CivetmanResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> CivetmanResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load `civetman.toml` from the project root (defaults when absent),
    /// then apply `CIVETMAN_*` environment overrides.
    pub fn load_for_root(root: &Path) -> CivetmanResult<(Self, Vec<ConfigWarning>)> {
        loader::load_for_root(root)
    }

    /// Apply environment variable overrides (CIVETMAN_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Resolve the immutable build mode for this process.
    pub fn build_mode(&self, overrides: ModeOverrides) -> BuildMode {
        BuildMode::new(
            OutputExt::from_tsx(self.build.tsx || overrides.tsx),
            self.sync.git && !overrides.no_git,
            self.sync.vscode && !overrides.no_vscode,
        )
    }

    /// Side-file quiet period
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.sync.debounce_ms)
    }
}
