//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --root and the build mode
//!   switches) are accepted before or after the subcommand

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ModeOverrides;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Civetman - compile Civet to TypeScript and keep editor/VCS excludes in sync
#[derive(Parser, Debug)]
#[command(name = "civetman")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output events as NDJSON (for CI and scripts)
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Emit .tsx instead of .ts
    #[arg(long, global = true)]
    pub tsx: bool,

    /// Do not touch .gitignore
    #[arg(long, global = true)]
    pub no_git: bool,

    /// Do not touch .vscode/settings.json
    #[arg(long, global = true)]
    pub no_vscode: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Build mode switches given on the command line
    pub fn mode_overrides(&self) -> ModeOverrides {
        ModeOverrides {
            tsx: self.tsx,
            no_git: self.no_git,
            no_vscode: self.no_vscode,
        }
    }
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Compile every source once and update the side files
    Build,

    /// Compile, then keep recompiling as sources change (Ctrl+C to stop)
    #[command(visible_alias = "watch")]
    Dev,
}
