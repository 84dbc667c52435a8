//! C/C++ language analyzer using Tree-sitter.

use callmap_core::Language;
use tree_sitter::Node;

use crate::analyzer::LanguageAnalyzer;
use crate::syntax::{first_named_child, node_text};

const SCOPE_SEPARATOR: &str = "::";

/// Resolves qualified names and call sites in C and C++ sources.
pub struct CppAnalyzer {
    grammar: tree_sitter::Language,
}

impl CppAnalyzer {
    /// Creates a new C++ analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grammar: tree_sitter_cpp::LANGUAGE.into(),
        }
    }

    /// Join the children of a scoped name, re-inserting `::` at separators.
    fn scoped_name(&self, node: Node<'_>, src: &[u8]) -> String {
        let mut name = String::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == SCOPE_SEPARATOR {
                name.push_str(SCOPE_SEPARATOR);
            } else {
                name.push_str(&self.base_name(child, src));
            }
        }
        name
    }

    /// `operator==`, `operator()`, `operator new[]`.
    fn operator_name(node: Node<'_>, src: &[u8]) -> String {
        let text = node_text(node, src);
        let symbol: String = text
            .strip_prefix("operator")
            .unwrap_or(text)
            .split_whitespace()
            .collect();
        if symbol.starts_with(|c: char| c.is_ascii_alphabetic()) {
            format!("operator {symbol}")
        } else {
            format!("operator{symbol}")
        }
    }

    /// One step inward along a declarator chain.
    ///
    /// `reference_declarator` and `parenthesized_declarator` wrap their inner
    /// declarator without a `declarator` field.
    fn inner_declarator(node: Node<'_>) -> Option<Node<'_>> {
        node.child_by_field_name("declarator")
            .or_else(|| match node.kind() {
                "reference_declarator" | "parenthesized_declarator" => first_named_child(node),
                _ => None,
            })
    }
}

impl Default for CppAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for CppAnalyzer {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn grammar(&self) -> tree_sitter::Language {
        self.grammar.clone()
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".cpp", ".cc", ".cxx", ".c++", ".h", ".hpp", ".hh", ".hxx"]
    }

    fn separator(&self) -> &'static str {
        SCOPE_SEPARATOR
    }

    fn base_name(&self, node: Node<'_>, src: &[u8]) -> String {
        match node.kind() {
            "identifier" | "field_identifier" | "type_identifier" | "namespace_identifier" => {
                node_text(node, src).to_owned()
            }
            "destructor_name" => first_named_child(node)
                .map(|id| self.base_name(id, src))
                .filter(|name| !name.is_empty())
                .map_or_else(String::new, |name| format!("~{name}")),
            "operator_name" => Self::operator_name(node, src),
            "qualified_identifier" | "nested_namespace_specifier" => self.scoped_name(node, src),
            "template_function" | "template_method" | "template_type" => node
                .child_by_field_name("name")
                .map_or_else(String::new, |name| self.base_name(name, src)),
            // `obj.method()` / `ptr->method()`: keep the member, drop the receiver
            "field_expression" => node
                .child_by_field_name("field")
                .map_or_else(String::new, |field| self.base_name(field, src)),
            _ => Self::inner_declarator(node)
                .map_or_else(String::new, |inner| self.base_name(inner, src)),
        }
    }

    fn is_definition(&self, node: Node<'_>) -> bool {
        node.kind() == "function_definition"
    }

    fn call_target<'t>(&self, node: Node<'t>) -> Option<Node<'t>> {
        if node.kind() == "call_expression" {
            node.child_by_field_name("function")
        } else {
            None
        }
    }

    fn definition_name<'t>(&self, def: Node<'t>) -> Option<Node<'t>> {
        let mut declarator = def.child_by_field_name("declarator")?;
        while !matches!(
            declarator.kind(),
            "function_declarator" | "field_declarator"
        ) {
            declarator = Self::inner_declarator(declarator)?;
        }
        declarator.child_by_field_name("declarator")
    }

    fn scope_name<'t>(&self, node: Node<'t>) -> Option<Node<'t>> {
        match node.kind() {
            "class_specifier" | "struct_specifier" | "union_specifier"
            | "namespace_definition" => node.child_by_field_name("name"),
            // template_declaration contributes no segment
            _ => None,
        }
    }
}
