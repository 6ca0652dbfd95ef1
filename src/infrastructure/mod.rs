//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system implementation
//! - `transpiler/` - Compiler process adapter

pub mod fs;
pub mod transpiler;

// Re-export for convenience
pub use fs::LocalFs;
pub use transpiler::CommandTranspiler;
