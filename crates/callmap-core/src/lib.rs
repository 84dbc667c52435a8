//! # callmap-core
//!
//! Core data model for static call graph extraction.
//!
//! This crate is parser-agnostic. It provides:
//!
//! - [`CallGraph`] and [`CallGraphEntry`] for caller → callee mappings
//! - [`Language`] for the fixed set of supported source languages
//! - [`Config`] for TOML-based run configuration
//! - [`report`] for text, DOT and JSON output
//! - [`Renderer`] for invoking an external graph renderer
//!
//! ## Example
//!
//! ```
//! use callmap_core::{report, CallGraph};
//!
//! let mut graph = CallGraph::new();
//! graph.insert("NS::Foo::bar", ["qux", "baz", "baz"].into_iter().collect());
//!
//! assert_eq!(report::text_report(&graph), "NS::Foo::bar calls: baz qux\n");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod graph;
mod language;
mod render;
mod types;

/// Text, DOT and JSON output.
pub mod report;

pub use config::{AnalyzerConfig, Config, ConfigError, OutputConfig};
pub use graph::{CallGraph, CallGraphEntry};
pub use language::{Language, UnsupportedLanguage};
pub use render::{GraphvizRenderer, RenderError, Renderer};
pub use types::{AnalysisResult, FileFailure};
