//! Node text and coordinate helpers.

use tree_sitter::Node;

use crate::ide::{Position, Range};

/// Verbatim source text of a node.
pub fn node_text<'a>(
    node: &Node<'_>,
    source: &'a str,
) -> &'a str {
    source.get(node.byte_range()).unwrap_or("")
}

/// The node's extent in `(row, byte column)` coordinates.
pub fn node_range(node: &Node<'_>) -> Range {
    Range::new(Position::from(node.start_position()), Position::from(node.end_position()))
}

/// Value of the grammar's `name` field, if the node has one.
pub fn name_node<'tree>(node: &Node<'tree>) -> Option<Node<'tree>> {
    node.child_by_field_name("name")
}
