//! Configuration types for callmap.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration, usually loaded from `callmap.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Source discovery and extraction settings.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Report and rendering settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Source discovery and extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Glob patterns to exclude, matched against root-relative paths.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to honour `.gitignore` and `.ignore` files (off by default).
    #[serde(default)]
    pub respect_gitignore: bool,

    /// Number of worker threads for extraction (default: rayon's choice).
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            respect_gitignore: false,
            parallelism: None,
        }
    }
}

/// Report and rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where the DOT description is written.
    #[serde(default = "default_dot")]
    pub dot: PathBuf,

    /// Where the rendered image is written.
    #[serde(default = "default_image")]
    pub image: PathBuf,

    /// Whether to invoke the renderer after writing the DOT file.
    #[serde(default = "default_true")]
    pub render: bool,

    /// Renderer executable.
    #[serde(default = "default_renderer")]
    pub renderer: String,

    /// Output format passed to the renderer as `-T<format>`.
    #[serde(default = "default_image_format")]
    pub image_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dot: default_dot(),
            image: default_image(),
            render: true,
            renderer: default_renderer(),
            image_format: default_image_format(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_dot() -> PathBuf {
    PathBuf::from("call_graph.dot")
}

fn default_image() -> PathBuf {
    PathBuf::from("call_graph.png")
}

fn default_renderer() -> String {
    "dot".to_string()
}

fn default_image_format() -> String {
    "png".to_string()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.analyzer.respect_gitignore);
        assert!(config.analyzer.exclude.is_empty());
        assert_eq!(config.output.dot, PathBuf::from("call_graph.dot"));
        assert_eq!(config.output.image, PathBuf::from("call_graph.png"));
        assert!(config.output.render);
        assert_eq!(config.output.renderer, "dot");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
exclude = ["**/third_party/**"]
respect_gitignore = true
parallelism = 2

[output]
dot = "out/graph.dot"
render = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.exclude, vec!["**/third_party/**"]);
        assert!(config.analyzer.respect_gitignore);
        assert_eq!(config.analyzer.parallelism, Some(2));
        assert_eq!(config.output.dot, PathBuf::from("out/graph.dot"));
        assert!(!config.output.render);
        // untouched keys keep their defaults
        assert_eq!(config.output.image_format, "png");
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("[analyzer\nexclude = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(std::path::Path::new("/nonexistent/callmap.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/callmap.toml"));
    }
}
