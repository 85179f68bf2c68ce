//! Doc comments: runs of whole-line `#` comments directly above a declaration.

use super::position::LineIndex;
use rubyscope_core::ast::NodeId;
use rubyscope_core::plugin::CommentAssociations;
use std::collections::HashMap;
use tree_sitter::Node as TsNode;

/// Text of every whole-line `#` comment, keyed by its 0-based row, marker stripped.
pub fn comment_lines(root: TsNode<'_>, source: &str, lines: &LineIndex<'_>) -> HashMap<usize, String> {
    let mut found = HashMap::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.kind() == "comment" {
            let row = node.start_position().row;
            let text = node.utf8_text(source.as_bytes()).unwrap_or_default();
            if lines.starts_line(row, node.start_byte()) {
                if let Some(body) = text.strip_prefix('#') {
                    let body = body.strip_prefix(' ').unwrap_or(body);
                    found.insert(row, body.trim_end().to_string());
                }
            }
            continue;
        }
        let mut cursor = node.walk();
        stack.extend(node.children(&mut cursor));
    }
    found
}

/// Attaches to each node the contiguous comment lines ending on the row above it.
pub fn associate(
    documentable: &[(NodeId, usize)],
    comment_lines: &HashMap<usize, String>,
) -> CommentAssociations {
    let mut associations = CommentAssociations::new();
    for &(id, row) in documentable {
        let mut block: Vec<&str> = Vec::new();
        let mut current = row;
        while current > 0 {
            current -= 1;
            match comment_lines.get(&current) {
                Some(line) => block.push(line),
                None => break,
            }
        }
        if block.is_empty() {
            continue;
        }
        block.reverse();
        associations.insert(id, block.join("\n"));
    }
    associations
}
