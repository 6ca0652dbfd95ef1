//! Managed regions of side files
//!
//! Each side file has a marker. Everything before it belongs to the user and
//! is carried over byte for byte; everything from the marker on belongs to
//! Civetman and is regenerated from the current output set on every rewrite.

use std::path::PathBuf;

use jsonc_parser::ast::Value as JsoncValue;
use jsonc_parser::parse_to_ast;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::value_objects::to_slash;

/// Two comment lines that open the managed region of `.gitignore`
pub const IGNORE_LIST_SENTINEL: [&str; 2] =
    ["# Generated by Civetman", "# Do not edit below this line"];

/// Top-level key of `.vscode/settings.json` holding the exclude mapping
pub const EDITOR_EXCLUDE_KEY: &str = "files.exclude";

/// Key inside `files.exclude` that opens the managed region
pub const EDITOR_EXCLUDE_MARKER: &str = "civetman:generated";

/// Existing side-file content that cannot be merged without losing user data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct SideFileParseError {
    pub reason: String,
}

impl SideFileParseError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Rewrite a `.gitignore`: keep the user prefix, regenerate the rest.
pub fn render_ignore_list<'a, I>(existing: &str, outputs: I) -> String
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    let mut content = match find_sentinel(existing) {
        Some(offset) => existing[..offset].to_string(),
        None => {
            let mut prefix = existing.to_string();
            if !prefix.is_empty() {
                if !prefix.ends_with('\n') {
                    prefix.push('\n');
                }
                if !prefix.ends_with("\n\n") {
                    prefix.push('\n');
                }
            }
            prefix
        }
    };

    for line in IGNORE_LIST_SENTINEL {
        content.push_str(line);
        content.push('\n');
    }
    for output in outputs {
        content.push_str(&ignore_entry(&to_slash(output)));
        content.push('\n');
    }

    content
}

/// Gitignore line matching exactly one root-relative path.
///
/// The leading `/` anchors the entry at the root and keeps a leading `#` or
/// `!` from being read as a comment or a negation.
fn ignore_entry(path: &str) -> String {
    let mut line = String::with_capacity(path.len() + 1);
    line.push('/');
    for ch in path.chars() {
        if matches!(ch, '*' | '?' | '[' | '\\') {
            line.push('\\');
        }
        line.push(ch);
    }
    // Unescaped trailing spaces are stripped by git.
    if line.ends_with(' ') {
        line.pop();
        line.push_str("\\ ");
    }
    line
}

/// Byte offset of the first sentinel line, if present
fn find_sentinel(existing: &str) -> Option<usize> {
    let mut offset = 0;
    for line in existing.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == IGNORE_LIST_SENTINEL[0] {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

/// Rewrite `.vscode/settings.json`: keep every other setting and the
/// `files.exclude` entries before the marker, regenerate the rest.
///
/// The file is JSONC. Edits are spliced into the original text, so comments,
/// trailing commas and formatting outside the exclude mapping survive. Content
/// that does not parse is reported and never overwritten.
pub fn render_editor_exclude<'a, I>(
    existing: &str,
    outputs: I,
) -> Result<String, SideFileParseError>
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    let outputs: Vec<String> = outputs
        .into_iter()
        .map(|output| to_slash(output.as_path()))
        .collect();
    if existing.trim().is_empty() {
        return Ok(fresh_settings(&outputs));
    }

    let parsed = parse_to_ast(existing, &Default::default(), &Default::default())
        .map_err(|e| SideFileParseError::new(e.to_string()))?;
    let root = match parsed.value {
        Some(JsoncValue::Object(root)) => root,
        Some(_) => return Err(SideFileParseError::new("settings are not a JSON object")),
        // Comments only: keep them above a new object.
        None => {
            let mut content = existing.to_string();
            if !content.ends_with('\n') {
                content.push('\n');
            }
            content.push_str(&fresh_settings(&outputs));
            return Ok(content);
        }
    };

    let mut content = existing.to_string();
    let current = root
        .properties
        .iter()
        .rev()
        .find(|prop| prop.name.as_str() == EDITOR_EXCLUDE_KEY);
    match current {
        Some(prop) => {
            let JsoncValue::Object(excludes) = &prop.value else {
                return Err(SideFileParseError::new(format!(
                    "`{}` is not a JSON object",
                    EDITOR_EXCLUDE_KEY
                )));
            };
            let kept: Vec<&str> = excludes
                .properties
                .iter()
                .take_while(|entry| entry.name.as_str() != EDITOR_EXCLUDE_MARKER)
                .map(|entry| &existing[entry.range.start..entry.range.end])
                .collect();
            content.replace_range(
                excludes.range.start..excludes.range.end,
                &exclude_object(&kept, &outputs),
            );
        }
        None => {
            let member = format!(
                "{}: {}",
                json_string(EDITOR_EXCLUDE_KEY),
                exclude_object(&[], &outputs)
            );
            match root.properties.last() {
                Some(last) => content.insert_str(last.range.end, &format!(",\n  {}", member)),
                None => content.insert_str(root.range.start + 1, &format!("\n  {}\n", member)),
            }
        }
    }

    Ok(content)
}

/// Settings file holding only the exclude mapping
fn fresh_settings(outputs: &[String]) -> String {
    let mut excludes = Map::new();
    excludes.insert(EDITOR_EXCLUDE_MARKER.to_string(), Value::Bool(true));
    for output in outputs {
        excludes.insert(output.clone(), Value::Bool(true));
    }
    let mut root = Map::new();
    root.insert(EDITOR_EXCLUDE_KEY.to_string(), Value::Object(excludes));

    // A map of strings and booleans always serializes.
    let mut content =
        serde_json::to_string_pretty(&Value::Object(root)).unwrap_or_else(|_| "{}".to_string());
    content.push('\n');
    content
}

/// `files.exclude` value laid out the way `fresh_settings` prints it
fn exclude_object(kept: &[&str], outputs: &[String]) -> String {
    let mut entries: Vec<String> = kept.iter().map(|entry| entry.to_string()).collect();
    entries.push(format!("{}: true", json_string(EDITOR_EXCLUDE_MARKER)));
    entries.extend(
        outputs
            .iter()
            .map(|output| format!("{}: true", json_string(output))),
    );
    format!("{{\n    {}\n  }}", entries.join(",\n    "))
}

fn json_string(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ignore::gitignore::GitignoreBuilder;
    use std::collections::BTreeSet;
    use std::path::Path;

    fn set(paths: &[&str]) -> BTreeSet<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    fn is_ignored(gitignore: &str, path: &str) -> bool {
        let mut builder = GitignoreBuilder::new("/project");
        for line in gitignore.lines() {
            builder.add_line(None, line).unwrap();
        }
        builder
            .build()
            .unwrap()
            .matched(Path::new(path), false)
            .is_ignore()
    }

    #[test]
    fn ignore_list_from_empty_file() {
        let rendered = render_ignore_list("", &set(&["b.ts", "a.ts"]));
        insta::assert_snapshot!(rendered, @r"
        # Generated by Civetman
        # Do not edit below this line
        /a.ts
        /b.ts
        ");
    }

    #[test]
    fn ignore_list_appends_after_user_content() {
        let rendered = render_ignore_list("node_modules\n.env", &set(&["a.ts"]));
        assert_eq!(
            rendered,
            "node_modules\n.env\n\n# Generated by Civetman\n# Do not edit below this line\n/a.ts\n"
        );
    }

    #[test]
    fn ignore_list_preserves_prefix_and_replaces_stale_entries() {
        let existing = "# mine\nnode_modules\n\n# Generated by Civetman\n# Do not edit below this line\n/old.ts\n/gone.ts\n";
        let rendered = render_ignore_list(existing, &set(&["a.ts", "b.ts"]));

        let prefix = "# mine\nnode_modules\n\n";
        assert!(rendered.starts_with(prefix));
        let managed: Vec<&str> = rendered[prefix.len()..].lines().skip(2).collect();
        assert_eq!(managed, vec!["/a.ts", "/b.ts"]);
    }

    #[test]
    fn ignore_list_rewrite_is_stable() {
        let outputs = set(&["src/x.ts"]);
        let first = render_ignore_list("dist\n", &outputs);
        let second = render_ignore_list(&first, &outputs);
        assert_eq!(first, second);
    }

    #[test]
    fn ignore_list_handles_crlf_marker() {
        let existing = "dist\r\n# Generated by Civetman\r\n# Do not edit below this line\r\nold.ts\r\n";
        let rendered = render_ignore_list(existing, &set(&[]));
        assert!(rendered.starts_with("dist\r\n# Generated by Civetman\n"));
        assert!(!rendered.contains("old.ts"));
    }

    #[test]
    fn ignore_entries_match_only_their_own_path() {
        let rendered = render_ignore_list("", &set(&["a.ts", "src/b.ts"]));

        assert!(is_ignored(&rendered, "a.ts"));
        assert!(is_ignored(&rendered, "src/b.ts"));
        assert!(!is_ignored(&rendered, "lib/a.ts"));
        assert!(!is_ignored(&rendered, "other/src/b.ts"));
    }

    #[test]
    fn ignore_entries_escape_gitignore_syntax() {
        let outputs = set(&["#notes.ts", "!keep.ts", "[id].ts", "what?.ts"]);
        let rendered = render_ignore_list("", &outputs);

        assert!(rendered.contains("\n/#notes.ts\n"));
        assert!(rendered.contains("\n/!keep.ts\n"));
        assert!(is_ignored(&rendered, "#notes.ts"));
        assert!(is_ignored(&rendered, "!keep.ts"));
        assert!(is_ignored(&rendered, "[id].ts"));
        assert!(!is_ignored(&rendered, "i.ts"));
        assert!(is_ignored(&rendered, "what?.ts"));
        assert!(!is_ignored(&rendered, "whats.ts"));
    }

    #[test]
    fn ignore_entry_keeps_trailing_space() {
        assert_eq!(ignore_entry("odd.ts "), "/odd.ts\\ ");
        assert_eq!(ignore_entry("a*b.ts"), "/a\\*b.ts");
    }

    #[test]
    fn editor_exclude_from_empty_file() {
        let rendered = render_editor_exclude("", &set(&["a.ts"])).unwrap();
        insta::assert_snapshot!(rendered, @r#"
        {
          "files.exclude": {
            "civetman:generated": true,
            "a.ts": true
          }
        }
        "#);
    }

    #[test]
    fn editor_exclude_keeps_user_settings_and_prefix_entries() {
        let existing = r#"{
  "editor.tabSize": 2,
  "files.exclude": {
    "**/.DS_Store": true,
    "civetman:generated": true,
    "stale.ts": true
  },
  "search.exclude": { "dist": true }
}"#;
        let rendered = render_editor_exclude(existing, &set(&["a.ts", "b.ts"])).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["editor.tabSize", "files.exclude", "search.exclude"]);

        let excludes: Vec<&String> = value[EDITOR_EXCLUDE_KEY]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(
            excludes,
            vec!["**/.DS_Store", "civetman:generated", "a.ts", "b.ts"]
        );
    }

    #[test]
    fn editor_exclude_keeps_comments_and_trailing_commas() {
        let existing = concat!(
            "{\n",
            "  // my font\n",
            "  \"editor.fontSize\": 14,\n",
            "  \"files.exclude\": { \"**/.DS_Store\": true, },\n",
            "}\n",
        );

        let rendered = render_editor_exclude(existing, &set(&["a.ts"])).unwrap();

        assert_eq!(
            rendered,
            concat!(
                "{\n",
                "  // my font\n",
                "  \"editor.fontSize\": 14,\n",
                "  \"files.exclude\": {\n",
                "    \"**/.DS_Store\": true,\n",
                "    \"civetman:generated\": true,\n",
                "    \"a.ts\": true\n",
                "  },\n",
                "}\n",
            )
        );
    }

    #[test]
    fn editor_exclude_is_inserted_into_commented_settings() {
        let existing = "{\n  /* tabs */\n  \"editor.tabSize\": 2, // two\n}\n";

        let rendered = render_editor_exclude(existing, &set(&["a.ts"])).unwrap();

        assert!(rendered
            .starts_with("{\n  /* tabs */\n  \"editor.tabSize\": 2,\n  \"files.exclude\": {\n"));
        assert!(rendered.ends_with("\"a.ts\": true\n  }, // two\n}\n"));
        let second = render_editor_exclude(&rendered, &set(&["a.ts"])).unwrap();
        assert_eq!(rendered, second);
    }

    #[test]
    fn editor_exclude_into_empty_object() {
        let rendered = render_editor_exclude("{}", &set(&["a.ts"])).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value[EDITOR_EXCLUDE_KEY]["a.ts"], Value::Bool(true));
    }

    #[test]
    fn editor_exclude_rejects_unparseable_settings() {
        let err = render_editor_exclude("{ not json", &set(&["a.ts"])).unwrap_err();
        assert!(!err.reason.is_empty());
    }

    #[test]
    fn editor_exclude_rejects_non_object_settings() {
        let err = render_editor_exclude("[1, 2]", &set(&[])).unwrap_err();
        assert_eq!(err.reason, "settings are not a JSON object");
    }

    #[test]
    fn editor_exclude_rejects_non_object_excludes() {
        let err = render_editor_exclude(r#"{"files.exclude": "nope"}"#, &set(&[])).unwrap_err();
        assert_eq!(err.to_string(), "`files.exclude` is not a JSON object");
    }

    #[test]
    fn editor_exclude_rewrite_is_stable() {
        let outputs = set(&["a.ts"]);
        let first = render_editor_exclude(r#"{"x": 1}"#, &outputs).unwrap();
        let second = render_editor_exclude(&first, &outputs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn editor_exclude_fresh_file_is_stable() {
        let outputs = set(&["a.ts", "src/b.ts"]);
        let first = render_editor_exclude("", &outputs).unwrap();
        let second = render_editor_exclude(&first, &outputs).unwrap();
        assert_eq!(first, second);
    }
}
