//! Call-Path Tree Exporter
//!
//! Renders a selected notification's call-path tree as indented text or
//! Graphviz DOT.

use crate::domain::callgraph::CallGraphNode;
use crate::error::{Result, YukonError};
use std::path::Path;

/// Output format for a rendered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    Text,
    Dot,
}

impl TreeFormat {
    /// Parse format from string (CLI input).
    pub fn from_str(s: &str) -> Option<TreeFormat> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(TreeFormat::Text),
            "dot" | "gv" => Some(TreeFormat::Dot),
            _ => None,
        }
    }
}

pub struct TreeExporter;

impl TreeExporter {
    /// Write a rendered tree to `path`.
    pub fn export(root: &CallGraphNode, format: TreeFormat, path: &Path) -> Result<()> {
        std::fs::write(path, Self::render(root, format)).map_err(|e| YukonError::io(path, e))
    }

    pub fn render(root: &CallGraphNode, format: TreeFormat) -> String {
        match format {
            TreeFormat::Text => Self::to_text(root),
            TreeFormat::Dot => Self::to_dot(root),
        }
    }

    /// One line per node, indented two spaces per level.
    pub fn to_text(root: &CallGraphNode) -> String {
        let mut lines = Vec::new();
        Self::text_lines(root, 0, &mut lines);
        lines.join("\n")
    }

    fn text_lines(node: &CallGraphNode, depth: usize, lines: &mut Vec<String>) {
        lines.push(format!("{}{}", "  ".repeat(depth), node.label));
        for child in &node.children {
            Self::text_lines(child, depth + 1, lines);
        }
    }

    /// Convert a tree to a DOT string.
    pub fn to_dot(root: &CallGraphNode) -> String {
        let mut lines = Vec::new();

        lines.push("digraph CallPath {".to_string());
        lines.push("    rankdir=TB;".to_string());
        lines.push("    node [shape=box, fontname=\"Helvetica\", fontsize=12];".to_string());
        lines.push("".to_string());

        // Frames may repeat, so nodes are keyed by visit order rather than label.
        let mut next_id = 0;
        Self::dot_node(root, &mut next_id, &mut lines);

        lines.push("}".to_string());
        lines.join("\n")
    }

    fn dot_node(node: &CallGraphNode, next_id: &mut usize, lines: &mut Vec<String>) -> usize {
        let id = *next_id;
        *next_id += 1;
        lines.push(format!(
            "    n{} [label=\"{}\"];",
            id,
            Self::escape_label(&node.label)
        ));
        for child in &node.children {
            let child_id = Self::dot_node(child, next_id, lines);
            lines.push(format!("    n{} -> n{};", id, child_id));
        }
        id
    }

    fn escape_label(label: &str) -> String {
        label
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
    }
}
