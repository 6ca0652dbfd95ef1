//! Build mode value object
//!
//! Resolved once per process (config + CLI flags) before any build runs.
//! Every component reads it; nothing mutates it.

use super::OutputExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMode {
    ext: OutputExt,
    git: bool,
    vscode: bool,
}

impl Default for BuildMode {
    fn default() -> Self {
        Self {
            ext: OutputExt::Ts,
            git: true,
            vscode: true,
        }
    }
}

impl BuildMode {
    pub fn new(ext: OutputExt, git: bool, vscode: bool) -> Self {
        Self { ext, git, vscode }
    }

    /// Output extension for generated files
    pub fn ext(&self) -> OutputExt {
        self.ext
    }

    /// Whether `.gitignore` is kept in sync
    pub fn syncs_git(&self) -> bool {
        self.git
    }

    /// Whether `.vscode/settings.json` is kept in sync
    pub fn syncs_vscode(&self) -> bool {
        self.vscode
    }
}
