use tree_sitter::Tree;

use super::*;
use crate::syntax::{CppParser, SyntaxParser, list_declaration_nodes, node_text};

fn parse(source: &str) -> Tree {
    CppParser::new().unwrap().parse(source).unwrap()
}

fn texts(
    nodes: &[Node<'_>],
    source: &str,
) -> Vec<String> {
    nodes.iter().map(|node| node_text(node, source).to_string()).collect()
}

#[test]
fn collects_nested_namespaces_and_classes_outermost_first() {
    let source = r#"namespace outer {
namespace inner {
class Shape {
public:
    struct Point {
        static int *origin(int dim);
    };
};
}
}
"#;
    let tree = parse(source);
    let declarations = list_declaration_nodes(&tree, source).unwrap();
    assert_eq!(declarations.len(), 1);

    let descriptor = build_definition(declarations[0]).unwrap();
    assert_eq!(texts(&descriptor.namespace_names, source), vec!["outer", "inner"]);
    assert_eq!(texts(&descriptor.class_names, source), vec!["Shape", "Point"]);
    assert_eq!(texts(&descriptor.classifier_tokens, source), vec!["static", "int", "*"]);
    assert_eq!(node_text(&descriptor.declarator, source), "origin(int dim)");
}

#[test]
fn free_function_has_no_scopes() {
    let source = "unsigned long checksum(const char *data, int len);";
    let tree = parse(source);
    let declaration = list_declaration_nodes(&tree, source).unwrap()[0];

    let descriptor = build_definition(declaration).unwrap();
    assert!(descriptor.namespace_names.is_empty());
    assert!(descriptor.class_names.is_empty());
    assert_eq!(texts(&descriptor.classifier_tokens, source), vec!["unsigned long"]);
}

#[test]
fn access_labels_and_sibling_members_do_not_leak() {
    let source = r#"class Widget {
public:
    int width;
    virtual void run() override;
};
"#;
    let tree = parse(source);
    let declaration = list_declaration_nodes(&tree, source).unwrap()[0];

    let descriptor = build_definition(declaration).unwrap();
    assert_eq!(texts(&descriptor.classifier_tokens, source), vec!["virtual", "void"]);
    assert_eq!(texts(&descriptor.class_names, source), vec!["Widget"]);
}

#[test]
fn anonymous_namespace_contributes_no_name() {
    let source = "namespace {\nnamespace detail {\nvoid helper();\n}\n}\n";
    let tree = parse(source);
    let declaration = list_declaration_nodes(&tree, source).unwrap()[0];

    let descriptor = build_definition(declaration).unwrap();
    assert_eq!(texts(&descriptor.namespace_names, source), vec!["detail"]);
}

#[test]
fn constructor_has_no_classifiers() {
    let source = "struct Point {\n    Point(int x, int y);\n};\n";
    let tree = parse(source);
    let declaration = list_declaration_nodes(&tree, source).unwrap()[0];

    let descriptor = build_definition(declaration).unwrap();
    assert!(descriptor.classifier_tokens.is_empty());
    assert_eq!(texts(&descriptor.class_names, source), vec!["Point"]);
}

#[test]
fn non_callable_declaration_yields_nothing() {
    let source = "int value;";
    let tree = parse(source);
    let mut cursor = tree.root_node().walk();
    let declaration = tree.root_node().children(&mut cursor).find(|node| node.kind() == "declaration").unwrap();
    assert!(build_definition(declaration).is_none());
}
