use tree_sitter::Node;

use crate::syntax::kind::NodeKind;

/// Find the function declarator nested under `node`.
///
/// Returns `node` itself when it is one; otherwise the first match of a
/// depth-first search over children in source order.
pub fn find_callable_declarator<'tree>(node: Node<'tree>) -> Option<Node<'tree>> {
    if NodeKind::of(&node) == NodeKind::FunctionDeclarator {
        return Some(node);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_callable_declarator(child) {
            return Some(found);
        }
    }
    None
}

pub fn is_callable_declaration(node: Node<'_>) -> bool {
    find_callable_declarator(node).is_some()
}

#[cfg(test)]
#[path = "../../tests/src/syntax/declarator_tests.rs"]
mod tests;
