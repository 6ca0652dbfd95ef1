//! Transpiler port - the external Civet → TypeScript compile step
//!
//! The compiler itself is not part of this crate. Anything that can turn
//! source text into target text (a spawned `civet` process, an in-memory fake
//! in tests) implements [`Transpiler`].

use std::path::Path;

use thiserror::Error;

/// Why a transpile call produced no output
#[derive(Debug, Error)]
pub enum TranspileError {
    /// The compiler program could not be started or talked to
    #[error("compiler `{program}` could not be run: {message}")]
    Unavailable { program: String, message: String },

    /// The compiler ran and rejected the input
    #[error("{message}")]
    Rejected { message: String },

    /// The compiler produced output that is not UTF-8
    #[error("compiler produced non UTF-8 output")]
    InvalidOutput,
}

/// Source text → target text
pub trait Transpiler {
    /// Compile `source`. `filename` is the project-relative source path and is
    /// only used for diagnostics and source maps by the compiler.
    fn transpile(&self, source: &str, filename: &Path) -> Result<String, TranspileError>;
}

impl<T: Transpiler + ?Sized> Transpiler for &T {
    fn transpile(&self, source: &str, filename: &Path) -> Result<String, TranspileError> {
        (**self).transpile(source, filename)
    }
}

impl<T: Transpiler + ?Sized> Transpiler for Box<T> {
    fn transpile(&self, source: &str, filename: &Path) -> Result<String, TranspileError> {
        (**self).transpile(source, filename)
    }
}
