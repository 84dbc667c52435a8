//! # callmap-ts
//!
//! Tree-sitter based static call graph extraction.
//!
//! This crate turns source trees into `callmap-core` [`CallGraph`]s. It adds:
//!
//! - [`LanguageAnalyzer`] trait for pluggable language support
//! - [`CppAnalyzer`] and [`PythonAnalyzer`] for the supported grammars
//! - [`ExtractionEngine`] for per-file extraction with one bound analyzer
//! - [`DirectoryWalker`] for whole-tree runs with deterministic merging
//!
//! ## Example
//!
//! ```
//! use callmap_core::Language;
//! use callmap_ts::ExtractionEngine;
//!
//! let engine = ExtractionEngine::new(Language::Python).unwrap();
//! let graph = engine
//!     .process_source("class Foo:\n    def bar(self):\n        self.baz()\n")
//!     .unwrap();
//! assert!(graph.get("Foo.bar").is_some_and(|e| e.contains("baz")));
//! ```
//!
//! [`CallGraph`]: callmap_core::CallGraph

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analyzer;
pub mod cpp;
pub mod engine;
pub mod python;
pub mod syntax;
pub mod walker;

pub use analyzer::{analyzer_for, LanguageAnalyzer};
pub use cpp::CppAnalyzer;
pub use engine::{EngineError, ExtractionEngine};
pub use python::PythonAnalyzer;
pub use walker::{DirectoryWalker, WalkError};
