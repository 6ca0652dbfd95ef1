//! Compiler process adapter
//!
//! Runs the configured compiler (the `civet` CLI by default) once per file:
//! source text on stdin, TypeScript on stdout, diagnostics on stderr.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::domain::ports::{TranspileError, Transpiler};
use crate::domain::value_objects::to_slash;

/// Argument placeholder replaced by the project-relative source path
pub const FILE_PLACEHOLDER: &str = "{file}";

#[derive(Debug, Clone)]
pub struct CommandTranspiler {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CommandTranspiler {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
        }
    }

    /// Run the compiler from `dir` (the project root)
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn expand_args(&self, filename: &Path) -> Vec<String> {
        let file = to_slash(filename);
        self.args
            .iter()
            .map(|arg| arg.replace(FILE_PLACEHOLDER, &file))
            .collect()
    }

    fn unavailable(&self, message: impl Into<String>) -> TranspileError {
        TranspileError::Unavailable {
            program: self.program.clone(),
            message: message.into(),
        }
    }
}

impl Transpiler for CommandTranspiler {
    fn transpile(&self, source: &str, filename: &Path) -> Result<String, TranspileError> {
        let mut command = Command::new(&self.program);
        command
            .args(self.expand_args(filename))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|e| self.unavailable(e.to_string()))?;

        // Feed stdin from a separate thread so a compiler that streams output
        // before reading all input cannot deadlock on a full pipe.
        let stdin = child.stdin.take();
        let input = source.to_string();
        let writer = std::thread::spawn(move || -> std::io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(input.as_bytes())?;
            }
            Ok(())
        });

        let output = child
            .wait_with_output()
            .map_err(|e| self.unavailable(e.to_string()))?;

        // A compiler that exits without reading stdin closes the pipe; its exit
        // status below is the meaningful signal then.
        let _ = writer.join();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("`{}` exited with {}", self.program, output.status)
            } else {
                stderr
            };
            return Err(TranspileError::Rejected { message });
        }

        String::from_utf8(output.stdout).map_err(|_| TranspileError::InvalidOutput)
    }
}
