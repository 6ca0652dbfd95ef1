//! Domain Value Objects
//!
//! Immutable value types that represent build concepts.

mod build_mode;
mod exclude_patterns;
mod output_ext;
mod path;

pub use build_mode::BuildMode;
pub use exclude_patterns::{ExcludeError, ExcludePatterns, DEFAULT_EXCLUDES};
pub use output_ext::{OutputExt, SOURCE_EXTENSION};
pub use path::{relative_to, to_slash};
