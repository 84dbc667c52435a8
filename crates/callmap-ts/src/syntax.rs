//! Small, pure helpers over tree-sitter nodes.

use tree_sitter::Node;

/// Source text covered by `node`, or `""` if the span is not valid UTF-8.
#[must_use]
pub fn node_text<'a>(node: Node<'_>, src: &'a [u8]) -> &'a str {
    src.get(node.start_byte()..node.end_byte())
        .and_then(|bytes| std::str::from_utf8(bytes).ok())
        .unwrap_or("")
}

/// All nodes under `root` (inclusive) in depth-first pre-order.
#[must_use]
pub fn preorder(root: Node<'_>) -> Vec<Node<'_>> {
    let mut nodes = Vec::new();
    let mut cursor = root.walk();
    loop {
        nodes.push(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return nodes;
            }
        }
    }
}

/// Ancestors of `node`, innermost first. Does not include `node` itself.
pub fn ancestors(node: Node<'_>) -> impl Iterator<Item = Node<'_>> {
    std::iter::successors(node.parent(), |n| n.parent())
}

/// First named child of `node`, if any.
#[must_use]
pub fn first_named_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let first = node.named_children(&mut cursor).next();
    first
}
