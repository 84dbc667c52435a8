//! Text, DOT and JSON renderings of a [`CallGraph`].

use std::collections::BTreeSet;
use std::path::Path;

use crate::graph::CallGraph;

/// Formats the graph as one `<caller> calls: <callee> ...` line per caller.
#[must_use]
pub fn text_report(graph: &CallGraph) -> String {
    let mut out = String::new();
    for (caller, entry) in graph.iter() {
        out.push_str(caller);
        out.push_str(" calls:");
        for callee in entry.iter() {
            out.push(' ');
            out.push_str(callee);
        }
        out.push('\n');
    }
    out
}

/// Makes a name safe to use as a quoted DOT node label.
///
/// `:`, `<`, `>` and spaces become `_`; `"` and `\` are backslash-escaped so
/// names like `operator""_km` still produce a valid ID.
#[must_use]
pub fn dot_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            ':' | '<' | '>' | ' ' => label.push('_'),
            '"' | '\\' => {
                label.push('\\');
                label.push(c);
            }
            other => label.push(other),
        }
    }
    label
}

/// Builds a Graphviz `digraph` description of the graph.
#[must_use]
pub fn to_dot(graph: &CallGraph) -> String {
    let mut lines = vec![
        "digraph CallGraph {".to_string(),
        "    node [shape=box, style=filled, fillcolor=lightblue];".to_string(),
    ];

    let mut nodes = BTreeSet::new();
    for (caller, entry) in graph.iter() {
        nodes.insert(dot_label(caller));
        nodes.extend(entry.iter().map(dot_label));
    }
    lines.extend(nodes.iter().map(|node| format!("    \"{node}\";")));

    lines.extend(graph.edges().map(|(caller, callee)| {
        format!("    \"{}\" -> \"{}\";", dot_label(caller), dot_label(callee))
    }));

    lines.push("}".to_string());
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Writes the DOT description of `graph` to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_dot(graph: &CallGraph, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_dot(graph))?;
    tracing::debug!("Wrote DOT description to {}", path.display());
    Ok(())
}

/// Serializes the graph as a pretty-printed JSON object.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(graph: &CallGraph) -> serde_json::Result<String> {
    serde_json::to_string_pretty(graph)
}
