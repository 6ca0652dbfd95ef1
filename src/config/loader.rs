//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CivetmanError, CivetmanResult};

use super::types::{Config, CONFIG_FILE_NAME};

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> CivetmanResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| CivetmanError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Project config (if any) with environment overrides applied.
///
/// A missing `civetman.toml` yields the defaults; a malformed one is an error.
pub fn load_for_root(root: &Path) -> CivetmanResult<(Config, Vec<ConfigWarning>)> {
    let path = root.join(CONFIG_FILE_NAME);
    let (config, warnings) = if path.is_file() {
        load_with_warnings(&path)?
    } else {
        (Config::default(), Vec::new())
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (CIVETMAN_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

pub(crate) fn with_env_overrides_from(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    // CIVETMAN_TSX
    if let Some(val) = get_env("CIVETMAN_TSX") {
        config.build.tsx = is_truthy(&val);
    }

    // CIVETMAN_NO_GIT
    if let Some(val) = get_env("CIVETMAN_NO_GIT") {
        if is_truthy(&val) {
            config.sync.git = false;
        }
    }

    // CIVETMAN_NO_VSCODE
    if let Some(val) = get_env("CIVETMAN_NO_VSCODE") {
        if is_truthy(&val) {
            config.sync.vscode = false;
        }
    }

    // CIVETMAN_COMPILER (whitespace separated: program then args)
    if let Some(val) = get_env("CIVETMAN_COMPILER") {
        let mut parts = val.split_whitespace().map(str::to_string);
        if let Some(program) = parts.next() {
            config.compiler.command = program;
            config.compiler.args = parts.collect();
        }
    }

    // CIVETMAN_DEBOUNCE_MS
    if let Some(val) = get_env("CIVETMAN_DEBOUNCE_MS") {
        if let Ok(ms) = val.trim().parse::<u64>() {
            config.sync.debounce_ms = ms;
        }
    }

    config
}

fn is_truthy(val: &str) -> bool {
    let val = val.trim().to_lowercase();
    !(val.is_empty() || val == "0" || val == "false" || val == "no")
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "build",
        "tsx",
        "sync",
        "git",
        "vscode",
        "debounce_ms",
        "compiler",
        "command",
        "args",
        "discovery",
        "exclude",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_counts_edits() {
        assert_eq!(levenshtein("tsx", "tsx"), 0);
        assert_eq!(levenshtein("tsc", "tsx"), 1);
        assert_eq!(levenshtein("vscod", "vscode"), 1);
    }

    #[test]
    fn suggest_key_only_for_close_matches() {
        assert_eq!(suggest_key("exlude"), Some("exclude".to_string()));
        assert_eq!(suggest_key("completely_unrelated"), None);
    }

    #[test]
    fn truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy("true"));
        assert!(is_truthy("YES"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy(""));
    }
}
