//! Source discovery
//!
//! Walks the project root once at startup and returns every `.civet` file
//! that is not excluded, as root-relative paths in a stable order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ignore::WalkBuilder;

use crate::domain::value_objects::{ExcludePatterns, OutputExt};
use crate::error::{CivetmanError, CivetmanResult};

/// Enumerate source files under `root`.
///
/// Siblings are visited in file-name order, so the result (and therefore the
/// batch build order) is the same on every run. Any walk error is fatal.
pub fn discover_sources(root: &Path, excludes: &ExcludePatterns) -> CivetmanResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(CivetmanError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    walk_sources(root, root, excludes)
}

/// Enumerate source files inside `dir`, a directory below `root`.
///
/// Paths are still relative to `root`, and excludes are matched against those
/// root-relative paths, so a directory that appears while watching yields the
/// same sources a startup walk would.
pub fn discover_sources_under(
    root: &Path,
    dir: &Path,
    excludes: &ExcludePatterns,
) -> CivetmanResult<Vec<PathBuf>> {
    if !dir.starts_with(root) {
        return Ok(Vec::new());
    }
    walk_sources(root, dir, excludes)
}

fn walk_sources(
    root: &Path,
    start: &Path,
    excludes: &ExcludePatterns,
) -> CivetmanResult<Vec<PathBuf>> {
    let filter_root = root.to_path_buf();
    let filter_excludes = Arc::new(excludes.clone());

    let walker = WalkBuilder::new(start)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let Ok(rel) = entry.path().strip_prefix(&filter_root) else {
                return true;
            };
            if rel.as_os_str().is_empty() {
                return true;
            }
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            !filter_excludes.is_excluded(rel, is_dir)
        })
        .build();

    let mut sources = Vec::new();
    for result in walker {
        let entry = result.map_err(|e| CivetmanError::Discovery {
            root: root.to_path_buf(),
            message: e.to_string(),
        })?;

        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file || !OutputExt::is_source(entry.path()) {
            continue;
        }

        if let Ok(rel) = entry.path().strip_prefix(root) {
            sources.push(rel.to_path_buf());
        }
    }

    Ok(sources)
}
