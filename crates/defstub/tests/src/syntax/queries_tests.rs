use super::*;
use crate::syntax::{CppParser, SyntaxParser, find_callable_declarator, node_text};

const WIDGET_HEADER: &str = r#"namespace ui {
int free_function(int x);
int global_value = 3;
char *buffer;

class Widget {
public:
    Widget();
    virtual ~Widget();
    virtual void draw() const = 0;
    int size() const;
    const std::string &name() const;
    Widget *clone();
    int count_ = 0;
    int *data_;
    void inline_body() {}
};
}
"#;

fn declarator_texts(source: &str) -> Vec<String> {
    let tree = CppParser::new().unwrap().parse(source).unwrap();
    list_declaration_nodes(&tree, source)
        .unwrap()
        .into_iter()
        .map(|node| node_text(&find_callable_declarator(node).unwrap(), source).to_string())
        .collect()
}

#[test]
fn lists_callable_declarations_in_document_order() {
    assert_eq!(
        declarator_texts(WIDGET_HEADER),
        vec!["free_function(int x)", "Widget()", "~Widget()", "size() const", "name() const", "clone()"]
    );
}

#[test]
fn every_listed_node_is_a_declaration_statement() {
    let tree = CppParser::new().unwrap().parse(WIDGET_HEADER).unwrap();
    for node in list_declaration_nodes(&tree, WIDGET_HEADER).unwrap() {
        assert!(matches!(node.kind(), "declaration" | "field_declaration"), "{}", node.kind());
    }
}

#[test]
fn pure_virtual_members_are_excluded() {
    let source = "struct Shape { virtual double area() const = 0; double perimeter() const; };";
    assert_eq!(declarator_texts(source), vec!["perimeter() const"]);
}

#[test]
fn function_definitions_are_not_declarations() {
    let source = "int answer() { return 42; }\nstruct S { void inline_body() {} };";
    assert!(declarator_texts(source).is_empty());
}

#[test]
fn empty_buffer_has_no_declarations() {
    assert!(declarator_texts("").is_empty());
}
