//! Output extension value object

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Extension of Civet source files (without the dot)
pub const SOURCE_EXTENSION: &str = "civet";

/// Which TypeScript flavour the generated files use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputExt {
    /// `.ts`
    #[default]
    Ts,
    /// `.tsx`
    Tsx,
}

impl OutputExt {
    /// Pick the variant from the `tsx` flag
    pub fn from_tsx(tsx: bool) -> Self {
        if tsx {
            OutputExt::Tsx
        } else {
            OutputExt::Ts
        }
    }

    /// Extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            OutputExt::Ts => "ts",
            OutputExt::Tsx => "tsx",
        }
    }

    /// Whether `path` carries the Civet source extension
    pub fn is_source(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext == SOURCE_EXTENSION)
            .unwrap_or(false)
    }
}

impl fmt::Display for OutputExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}
