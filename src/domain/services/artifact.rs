//! Source → artifact mapping
//!
//! [`output_path`] is the only place that knows which file a source produces.
//! The build executor, the watch session and the unlink cleanup all call it
//! instead of recomputing the name.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::{to_slash, OutputExt};

/// Second line of every generated file
pub const GENERATOR_LINE: &str = "// Generated by Civetman";

/// Output path for `source` under the given extension mode.
///
/// `src/app.civet` → `src/app.ts` (or `src/app.tsx`). Only the last extension
/// is replaced, so `a.test.civet` → `a.test.ts`.
pub fn output_path(source: &Path, ext: OutputExt) -> PathBuf {
    source.with_extension(ext.extension())
}

/// Prefix compiled text with the two-line provenance header and a blank line.
pub fn with_provenance_header(source: &Path, compiled: &str) -> String {
    format!(
        "// Source: {}\n{}\n\n{}",
        to_slash(source),
        GENERATOR_LINE,
        compiled
    )
}
