//! Supported source languages.
//!
//! A run binds exactly one language, chosen by an explicit tag on the
//! command line. There is no auto-detection.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Source languages callmap can extract call graphs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// C and C++ sources (tree-sitter-cpp grammar).
    Cpp,
    /// Python sources.
    Python,
}

impl Language {
    /// Every supported language, in display order.
    pub const ALL: [Language; 2] = [Language::Cpp, Language::Python];

    /// Canonical command-line tag.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Cpp => "cpp",
            Self::Python => "python",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cpp => "C++",
            Self::Python => "Python",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Unrecognized language tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language '{tag}' (expected one of: cpp, python)")]
pub struct UnsupportedLanguage {
    /// The tag as given.
    pub tag: String,
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpp" | "c++" | "cxx" => Ok(Self::Cpp),
            "python" | "py" => Ok(Self::Python),
            _ => Err(UnsupportedLanguage { tag: s.to_owned() }),
        }
    }
}
