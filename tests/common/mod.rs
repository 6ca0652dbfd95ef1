//! Shared helpers for CLI integration tests.
//!
//! `TestEnv` owns a temporary project whose `civetman.toml` points the
//! compiler at `cat`, so generated files hold the source text verbatim.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const PASSTHROUGH_CONFIG: &str = "[compiler]\ncommand = \"cat\"\n";

const ENV_OVERRIDES: &[&str] = &[
    "CIVETMAN_TSX",
    "CIVETMAN_NO_GIT",
    "CIVETMAN_NO_VSCODE",
    "CIVETMAN_COMPILER",
    "CIVETMAN_DEBOUNCE_MS",
];

/// Result of running the civetman binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Parse stdout as NDJSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l).unwrap_or_else(|e| panic!("not JSON: {l}: {e}"))
            })
            .collect()
    }
}

/// Isolated project directory plus helpers to drive the CLI against it
pub struct TestEnv {
    pub project_root: TempDir,
}

impl TestEnv {
    /// Project with the passthrough compiler config
    pub fn new() -> Self {
        let env = Self::bare();
        env.write("civetman.toml", PASSTHROUGH_CONFIG);
        env
    }

    /// Project with no files at all
    pub fn bare() -> Self {
        Self {
            project_root: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create directories");
        }
        std::fs::write(&path, content).expect("failed to write file");
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("failed to read {relative}: {e}"))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    /// A `Command` for the binary with CIVETMAN_* overrides cleared
    pub fn command(&self, cwd: &Path) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_civetman"));
        cmd.current_dir(cwd).env("NO_COLOR", "1");
        for key in ENV_OVERRIDES {
            cmd.env_remove(key);
        }
        cmd
    }

    /// Run from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.project_root.path(), args)
    }

    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        let output = self
            .command(cwd)
            .args(args)
            .output()
            .expect("failed to execute civetman");
        TestResult::from_output(output)
    }
}
