//! Path helpers shared by discovery, the watcher and side-file rendering

use std::path::{Component, Path, PathBuf};

/// Render a relative path with `/` separators on every platform.
///
/// Side files (`.gitignore`, VS Code `files.exclude`) and generated headers
/// must not change between operating systems.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Strip `root` from `path`, returning `None` for paths outside the root.
///
/// Relative inputs are returned unchanged (minus any leading `./`).
pub fn relative_to(root: &Path, path: &Path) -> Option<PathBuf> {
    if path.is_relative() {
        let cleaned: PathBuf = path
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        return Some(cleaned);
    }
    path.strip_prefix(root).ok().map(Path::to_path_buf)
}
