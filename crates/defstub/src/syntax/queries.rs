use tree_sitter::{Node, Query, QueryCursor, StreamingIterator, Tree};

use crate::syntax::{SyntaxError, cpp_language, declarator::is_callable_declaration};

/// Declarations whose declarator may lead to a function signature.
///
/// Field declarations carrying a `default_value` (`= 0`, `= nullptr`,
/// brace initializers) are left out.
const DECLARATION_QUERY: &str = r#"
(declaration
  declarator: [(function_declarator) (reference_declarator) (pointer_declarator)]) @declaration

(field_declaration
  declarator: [(function_declarator) (reference_declarator) (pointer_declarator)]
  !default_value) @declaration
"#;

/// Enumerate declaration nodes that declare a callable, in document order.
pub fn list_declaration_nodes<'tree>(
    tree: &'tree Tree,
    source: &str,
) -> Result<Vec<Node<'tree>>, SyntaxError> {
    let query = Query::new(&cpp_language(), DECLARATION_QUERY).map_err(|e| SyntaxError::Query(e.to_string()))?;
    let mut cursor = QueryCursor::new();
    let mut declarations = Vec::new();

    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());
    while let Some(m) = matches.next() {
        for capture in m.captures {
            if is_callable_declaration(capture.node) {
                declarations.push(capture.node);
            }
        }
    }

    Ok(declarations)
}

#[cfg(test)]
#[path = "../../tests/src/syntax/queries_tests.rs"]
mod tests;
