//! Build event types for NDJSON output

use serde::Serialize;

/// What caused a file to be (re)built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildTrigger {
    /// Startup scan (batch build or the first pass of `dev`)
    Initial,
    /// A new source appeared while watching
    Add,
    /// A tracked source was modified
    Change,
}

/// Events reported by `civetman build`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BuildEvent {
    BuildStarted {
        root: String,
        sources: usize,
    },
    FileBuilt {
        source: String,
        output: String,
    },
    FileFailed {
        source: String,
        stage: String,
        message: String,
    },
    SideFileSynced {
        file: String,
        entries: usize,
    },
    Warning {
        message: String,
    },
    BuildComplete {
        built: usize,
        failed: usize,
    },
}

impl BuildEvent {
    /// Convert to JSON string with "command": "build" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("build"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
