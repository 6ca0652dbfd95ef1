//! Transpiler Implementations
//!
//! Concrete implementations of the Transpiler port.

mod command;

pub use command::{CommandTranspiler, FILE_PLACEHOLDER};
