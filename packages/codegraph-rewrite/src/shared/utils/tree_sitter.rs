//! Tree-sitter Utility Functions
//!
//! Common utilities for working with tree-sitter nodes.

use crate::shared::models::Span;
use tree_sitter::Node;

/// Extract text content from a node
#[inline]
pub fn extract_node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    source.get(node.byte_range()).unwrap_or("")
}

/// Convert tree-sitter node to Span (1-indexed lines, byte offsets kept)
#[inline]
pub fn node_to_span(node: &Node) -> Span {
    let start_pos = node.start_position();
    let end_pos = node.end_position();
    Span::new(
        start_pos.row as u32 + 1,
        start_pos.column as u32,
        end_pos.row as u32 + 1,
        end_pos.column as u32,
    )
    .with_bytes(node.start_byte(), node.end_byte())
}

/// Direct children of a node paired with the field name they occupy
pub fn children_with_fields<'a>(node: &Node<'a>) -> Vec<(Node<'a>, Option<&'static str>)> {
    let mut cursor = node.walk();
    let mut result = Vec::with_capacity(node.child_count());
    if cursor.goto_first_child() {
        loop {
            result.push((cursor.node(), cursor.field_name()));
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    result
}

/// Collect the first `limit` error/missing nodes of a tree
pub fn collect_error_spans(node: &Node, limit: usize) -> Vec<Span> {
    let mut errors = Vec::new();
    let mut stack = vec![*node];
    while let Some(current) = stack.pop() {
        if errors.len() >= limit {
            break;
        }
        if current.is_error() || current.is_missing() {
            errors.push(node_to_span(&current));
            continue;
        }
        if !current.has_error() {
            continue;
        }
        for i in (0..current.child_count()).rev() {
            if let Some(child) = current.child(i) {
                stack.push(child);
            }
        }
    }
    errors
}
