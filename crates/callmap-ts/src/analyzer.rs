//! Language-agnostic analysis trait.
//!
//! `LanguageAnalyzer` is the extension point for adding new languages.
//! An implementation supplies the grammar and a handful of node-kind hooks;
//! the traversal algorithms (definition discovery, scope walking, call
//! collection) are provided methods shared by every language.

use std::collections::BTreeSet;

use callmap_core::Language;
use tree_sitter::Node;

use crate::syntax::{ancestors, preorder};

/// Per-language name resolution and call extraction over a tree-sitter grammar.
///
/// All operations are pure functions of a syntax tree and its source bytes.
/// Absent nodes never raise: they yield an empty name or are skipped.
pub trait LanguageAnalyzer: Send + Sync {
    /// Language this analyzer handles.
    fn language(&self) -> Language;

    /// Tree-sitter grammar used to parse source files.
    fn grammar(&self) -> tree_sitter::Language;

    /// Lower-cased file extensions this analyzer claims (e.g. `&[".py"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Separator placed between scope segments of a qualified name.
    fn separator(&self) -> &'static str;

    /// Shortest readable identifier denoted by a name-bearing node.
    ///
    /// Returns an empty string when `node` is not a name.
    fn base_name(&self, node: Node<'_>, src: &[u8]) -> String;

    /// Whether `node` is a function/method definition with a body.
    fn is_definition(&self, node: Node<'_>) -> bool;

    /// The callee expression of `node` if it is a call.
    fn call_target<'t>(&self, node: Node<'t>) -> Option<Node<'t>>;

    /// The name node of a definition.
    fn definition_name<'t>(&self, def: Node<'t>) -> Option<Node<'t>>;

    /// The name node of `node` if it introduces a naming scope.
    fn scope_name<'t>(&self, node: Node<'t>) -> Option<Node<'t>>;

    /// The body of a definition.
    fn definition_body<'t>(&self, def: Node<'t>) -> Option<Node<'t>> {
        def.child_by_field_name("body")
    }

    /// Fully-qualified name of a definition, outermost scope first.
    ///
    /// Returns an empty string if the definition's own name cannot be
    /// resolved. Scopes whose name resolves to nothing are left out.
    fn fully_qualified_name(&self, def: Node<'_>, src: &[u8]) -> String {
        let Some(name_node) = self.definition_name(def) else {
            return String::new();
        };
        let base = self.base_name(name_node, src);
        if base.is_empty() {
            return String::new();
        }

        let mut segments: Vec<String> = ancestors(def)
            .filter_map(|node| self.scope_name(node))
            .map(|name| self.base_name(name, src))
            .filter(|name| !name.is_empty())
            .collect();
        segments.reverse();
        segments.push(base);
        segments.join(self.separator())
    }

    /// Every definition under `root`, in depth-first pre-order.
    fn enumerate_definitions<'t>(&self, root: Node<'t>) -> Vec<Node<'t>> {
        preorder(root)
            .into_iter()
            .filter(|node| self.is_definition(*node))
            .collect()
    }

    /// Distinct callee names of every call found under `body`.
    fn extract_calls(&self, body: Node<'_>, src: &[u8]) -> BTreeSet<String> {
        preorder(body)
            .into_iter()
            .filter_map(|node| self.call_target(node))
            .map(|callee| self.base_name(callee, src))
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Whether `path` has one of this analyzer's extensions (case-insensitive).
    fn claims(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .is_some_and(|ext| self.extensions().contains(&ext.as_str()))
    }
}

/// Returns the analyzer for `language`.
#[must_use]
pub fn analyzer_for(language: Language) -> Box<dyn LanguageAnalyzer> {
    match language {
        Language::Cpp => Box::new(crate::cpp::CppAnalyzer::new()),
        Language::Python => Box::new(crate::python::PythonAnalyzer::new()),
    }
}
