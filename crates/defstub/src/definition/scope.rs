use tree_sitter::Node;

use crate::syntax::{find_callable_declarator, helpers::name_node, kind::NodeKind};

/// Everything needed to render one out-of-line definition.
///
/// All nodes borrow the syntax tree of the current command invocation.
#[derive(Debug, Clone)]
pub struct DefinitionDescriptor<'tree> {
    /// The `function_declarator` node.
    pub declarator: Node<'tree>,
    /// Specifier tokens in front of the declarator: outer levels first,
    /// source order within a level.
    pub classifier_tokens: Vec<Node<'tree>>,
    /// Enclosing namespace names, outermost first.
    pub namespace_names: Vec<Node<'tree>>,
    /// Enclosing class/struct/union names, outermost first.
    pub class_names: Vec<Node<'tree>>,
}

/// Reconstruct the scope chain and specifiers of a callable declaration.
///
/// Walks from the callable declarator up to the root. Sibling tokens are only
/// collected below the first declaration statement met on the way up, so
/// access labels and other members of the enclosing scope never leak in.
/// Lists are gathered innermost first and reversed once at the end.
pub fn build_definition<'tree>(declaration: Node<'tree>) -> Option<DefinitionDescriptor<'tree>> {
    let declarator = find_callable_declarator(declaration)?;

    let mut classifier_tokens = Vec::new();
    let mut namespace_names = Vec::new();
    let mut class_names = Vec::new();
    let mut reached_outer_declaration = false;

    let mut current = Some(declarator);
    while let Some(node) = current {
        match NodeKind::of(&node) {
            kind if kind.is_declaration() => reached_outer_declaration = true,
            // Anonymous namespaces and unnamed classes have no `name` field.
            NodeKind::NamespaceDefinition => namespace_names.extend(name_node(&node)),
            NodeKind::ClassSpecifier => class_names.extend(name_node(&node)),
            _ => {},
        }

        if !reached_outer_declaration {
            let mut sibling = node.prev_sibling();
            while let Some(token) = sibling {
                classifier_tokens.push(token);
                sibling = token.prev_sibling();
            }
        }

        current = node.parent();
    }

    classifier_tokens.reverse();
    namespace_names.reverse();
    class_names.reverse();

    Some(DefinitionDescriptor {
        declarator,
        classifier_tokens,
        namespace_names,
        class_names,
    })
}

#[cfg(test)]
#[path = "../../tests/src/definition/scope_tests.rs"]
mod tests;
