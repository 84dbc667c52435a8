//! Python language analyzer using Tree-sitter.

use callmap_core::Language;
use tree_sitter::Node;

use crate::analyzer::LanguageAnalyzer;
use crate::syntax::node_text;

/// Resolves qualified names and call sites in Python sources.
///
/// Enclosing classes and functions both count as scopes, so a nested
/// function `inner` inside `outer` resolves to `outer.inner`.
pub struct PythonAnalyzer {
    grammar: tree_sitter::Language,
}

impl PythonAnalyzer {
    /// Creates a new Python analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grammar: tree_sitter_python::LANGUAGE.into(),
        }
    }
}

impl Default for PythonAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for PythonAnalyzer {
    fn language(&self) -> Language {
        Language::Python
    }

    fn grammar(&self) -> tree_sitter::Language {
        self.grammar.clone()
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".py"]
    }

    fn separator(&self) -> &'static str {
        "."
    }

    fn base_name(&self, node: Node<'_>, src: &[u8]) -> String {
        match node.kind() {
            "identifier" => node_text(node, src).to_owned(),
            // `self.method` / `module.func`: keep the attribute only
            "attribute" => node
                .child_by_field_name("attribute")
                .map_or_else(String::new, |attr| node_text(attr, src).to_owned()),
            _ => String::new(),
        }
    }

    fn is_definition(&self, node: Node<'_>) -> bool {
        node.kind() == "function_definition"
    }

    fn call_target<'t>(&self, node: Node<'t>) -> Option<Node<'t>> {
        if node.kind() == "call" {
            node.child_by_field_name("function")
        } else {
            None
        }
    }

    fn definition_name<'t>(&self, def: Node<'t>) -> Option<Node<'t>> {
        def.child_by_field_name("name")
    }

    fn scope_name<'t>(&self, node: Node<'t>) -> Option<Node<'t>> {
        match node.kind() {
            "class_definition" | "function_definition" => node.child_by_field_name("name"),
            _ => None,
        }
    }
}
