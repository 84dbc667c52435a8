//! Extraction engine.
//!
//! Turns raw source into a syntax tree with the bound analyzer's grammar and
//! collects a per-file [`CallGraph`].

use std::path::{Path, PathBuf};

use callmap_core::{CallGraph, CallGraphEntry, Language};
use tracing::debug;
use tree_sitter::{Node, Parser};

use crate::analyzer::{analyzer_for, LanguageAnalyzer};

/// Errors raised while extracting a call graph from one file.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A parser could not be built or produced no tree.
    #[error("{language} parser error: {message}")]
    Parser {
        /// Language whose grammar failed.
        language: Language,
        /// Error detail.
        message: String,
    },
}

/// Extracts call graphs with a single bound [`LanguageAnalyzer`].
pub struct ExtractionEngine {
    analyzer: Box<dyn LanguageAnalyzer>,
}

impl ExtractionEngine {
    /// Creates an engine for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Parser`] if the grammar cannot be loaded.
    pub fn new(language: Language) -> Result<Self, EngineError> {
        Self::with_analyzer(analyzer_for(language))
    }

    /// Creates an engine around a custom analyzer.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Parser`] if the grammar cannot be loaded.
    pub fn with_analyzer(analyzer: Box<dyn LanguageAnalyzer>) -> Result<Self, EngineError> {
        Self::parser_for(analyzer.as_ref())?;
        Ok(Self { analyzer })
    }

    /// The bound analyzer.
    #[must_use]
    pub fn analyzer(&self) -> &dyn LanguageAnalyzer {
        self.analyzer.as_ref()
    }

    /// Language of the bound analyzer.
    #[must_use]
    pub fn language(&self) -> Language {
        self.analyzer.language()
    }

    fn parser_for(analyzer: &dyn LanguageAnalyzer) -> Result<Parser, EngineError> {
        let mut parser = Parser::new();
        parser
            .set_language(&analyzer.grammar())
            .map_err(|e| EngineError::Parser {
                language: analyzer.language(),
                message: e.to_string(),
            })?;
        Ok(parser)
    }

    /// Reads and extracts one file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] if the file cannot be read.
    pub fn process_file(&self, path: &Path) -> Result<CallGraph, EngineError> {
        debug!("Extracting: {}", path.display());
        let bytes = std::fs::read(path).map_err(|e| EngineError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.process_bytes(&bytes)
    }

    /// Extracts call graph entries from source text.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Parser`] if no syntax tree could be produced.
    pub fn process_source(&self, source: &str) -> Result<CallGraph, EngineError> {
        self.process_bytes(source.as_bytes())
    }

    /// Extracts call graph entries from raw source bytes.
    ///
    /// Malformed source is tolerated: error nodes simply match nothing.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Parser`] if no syntax tree could be produced.
    pub fn process_bytes(&self, src: &[u8]) -> Result<CallGraph, EngineError> {
        let mut parser = Self::parser_for(self.analyzer.as_ref())?;
        let tree = parser.parse(src, None).ok_or_else(|| EngineError::Parser {
            language: self.language(),
            message: "parser produced no syntax tree".to_string(),
        })?;
        Ok(self.extract(tree.root_node(), src))
    }

    fn extract(&self, root: Node<'_>, src: &[u8]) -> CallGraph {
        let mut graph = CallGraph::new();
        for def in self.analyzer.enumerate_definitions(root) {
            let name = self.analyzer.fully_qualified_name(def, src);
            if name.is_empty() {
                continue;
            }
            let Some(body) = self.analyzer.definition_body(def) else {
                continue;
            };
            let calls = self.analyzer.extract_calls(body, src);
            graph.insert(name, CallGraphEntry::from(calls));
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn callees(graph: &CallGraph, caller: &str) -> Vec<String> {
        graph.get(caller).map(CallGraphEntry::to_vec).unwrap_or_default()
    }

    #[test]
    fn cpp_namespace_scenario() {
        let engine = ExtractionEngine::new(Language::Cpp).unwrap();
        let graph = engine
            .process_source("namespace NS { class Foo { void bar() { baz(); baz(); qux(); } }; }")
            .unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(callees(&graph, "NS::Foo::bar"), vec!["baz", "qux"]);
    }

    #[test]
    fn python_class_scenario() {
        let engine = ExtractionEngine::new(Language::Python).unwrap();
        let src = "class Foo:\n    def bar(self):\n        self.baz()\n        qux()\n";
        let graph = engine.process_source(src).unwrap();
        assert_eq!(callees(&graph, "Foo.bar"), vec!["baz", "qux"]);
    }

    #[test]
    fn redefinition_in_same_file_overwrites() {
        let engine = ExtractionEngine::new(Language::Python).unwrap();
        let src = "def f():\n    first()\n\ndef f():\n    second()\n";
        let graph = engine.process_source(src).unwrap();
        assert_eq!(callees(&graph, "f"), vec!["second"]);
    }

    #[test]
    fn function_without_calls_is_recorded() {
        let engine = ExtractionEngine::new(Language::Cpp).unwrap();
        let graph = engine.process_source("void idle() {}").unwrap();
        assert!(graph.get("idle").is_some_and(CallGraphEntry::is_empty));
    }

    #[test]
    fn extraction_is_idempotent() {
        let engine = ExtractionEngine::new(Language::Cpp).unwrap();
        let src = "struct A { void f() { g(); h(); } }; void g() { h(); }";
        assert_eq!(
            engine.process_source(src).unwrap(),
            engine.process_source(src).unwrap()
        );
    }

    #[test]
    fn garbage_input_yields_no_empty_callers() {
        let engine = ExtractionEngine::new(Language::Cpp).unwrap();
        let graph = engine.process_source("}}}{{ void ( ) { x(; int").unwrap();
        assert!(graph.iter().all(|(caller, _)| !caller.is_empty()));
    }

    #[test]
    fn invalid_utf8_is_tolerated() {
        let engine = ExtractionEngine::new(Language::Python).unwrap();
        let mut src = b"def ok():\n    go()\n# ".to_vec();
        src.extend_from_slice(&[0xff, 0xfe, b'\n']);
        let graph = engine.process_bytes(&src).unwrap();
        assert_eq!(callees(&graph, "ok"), vec!["go"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let engine = ExtractionEngine::new(Language::Python).unwrap();
        let err = engine
            .process_file(Path::new("/nonexistent/callmap/x.py"))
            .unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }
}
