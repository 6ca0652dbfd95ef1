//! Exclude patterns value object
//!
//! Directories and files that are never treated as sources, matched with
//! gitignore semantics. Discovery and the watcher share one instance so a file
//! is either visible to both or to neither.

use std::fmt;
use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Excluded when the config does not say otherwise
pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules/", ".git/", "dist/"];

/// Maximum number of patterns allowed
const MAX_PATTERNS: usize = 1000;

/// Compiled exclude patterns.
///
/// Uses the `ignore` crate for gitignore-compatible pattern matching.
#[derive(Debug, Clone)]
pub struct ExcludePatterns {
    matcher: Gitignore,
    pattern_count: usize,
}

impl Default for ExcludePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl ExcludePatterns {
    /// Create an empty pattern set (matches nothing).
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }

    /// The built-in set: dependency, VCS and output directories.
    pub fn defaults(root: &Path) -> Self {
        let patterns: Vec<String> = DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect();
        Self::from_patterns(root, &patterns).unwrap_or_else(|_| Self::empty())
    }

    /// Compile patterns rooted at `root`.
    ///
    /// Blank entries and `#` comments are skipped. A bare directory name such
    /// as `node_modules` matches at any depth, as in a `.gitignore`.
    pub fn from_patterns(root: &Path, patterns: &[String]) -> Result<Self, ExcludeError> {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for pattern in patterns {
            let trimmed = pattern.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            pattern_count += 1;
            if pattern_count > MAX_PATTERNS {
                return Err(ExcludeError::TooManyPatterns {
                    count: pattern_count,
                    limit: MAX_PATTERNS,
                });
            }

            if let Err(e) = builder.add_line(None, trimmed) {
                return Err(ExcludeError::InvalidPattern {
                    pattern: trimmed.to_string(),
                    message: e.to_string(),
                });
            }
        }

        let matcher = builder
            .build()
            .map_err(|e| ExcludeError::BuildFailed(e.to_string()))?;

        Ok(Self {
            matcher,
            pattern_count,
        })
    }

    /// Check if a root-relative path is excluded.
    ///
    /// `is_dir` should be true if the path is a directory.
    pub fn is_excluded(&self, rel_path: &Path, is_dir: bool) -> bool {
        if self.pattern_count == 0 || rel_path.has_root() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(rel_path, is_dir)
            .is_ignore()
    }

    /// Get the number of patterns loaded.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Check if this is an empty pattern set.
    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}

/// Errors that can occur when compiling exclude patterns.
#[derive(Debug)]
pub enum ExcludeError {
    /// Too many patterns in the config.
    TooManyPatterns { count: usize, limit: usize },
    /// A pattern has invalid syntax.
    InvalidPattern { pattern: String, message: String },
    /// Failed to build the gitignore matcher.
    BuildFailed(String),
}

impl fmt::Display for ExcludeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyPatterns { count, limit } => {
                write!(f, "{} exclude patterns exceed the {} limit", count, limit)
            }
            Self::InvalidPattern { pattern, message } => {
                write!(f, "Invalid exclude pattern '{}' - {}", pattern, message)
            }
            Self::BuildFailed(msg) => write!(f, "Failed to build exclude matcher: {}", msg),
        }
    }
}

impl std::error::Error for ExcludeError {}
