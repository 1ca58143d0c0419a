//! Text synthesis for out-of-line definition stubs.

use std::sync::OnceLock;

use regex::Regex;
use tree_sitter::Node;

use crate::{
    definition::scope::DefinitionDescriptor,
    syntax::{kind::NodeKind, node_text},
};

/// Specifiers that are only valid on the in-class declaration.
const DECLARATION_ONLY_SPECIFIERS: &[&str] = &["virtual", "static", "explicit"];

/// Pointer and reference markers bind to whatever follows them.
const TIGHT_TOKENS: &[&str] = &["*", "&", "&&"];

static LINE_BREAK_RE: OnceLock<Regex> = OnceLock::new();

fn line_break_re() -> &'static Regex {
    LINE_BREAK_RE.get_or_init(|| Regex::new(r"[ \t]*\r?\n\s*").expect("line break pattern is valid"))
}

/// Render the declarator without `final`/`override`, followed by an empty body.
///
/// Returns an empty string for anything that is not a function declarator.
/// Specifiers and comments are removed by node boundaries, so identifiers that
/// merely contain `final` or `override` are left alone. Line breaks inside the
/// signature are folded into single spaces so every stub is one line.
pub fn declarator_text(
    node: &Node<'_>,
    source: &str,
) -> String {
    if NodeKind::of(node) != NodeKind::FunctionDeclarator {
        return String::new();
    }

    let mut removed = Vec::new();
    collect_removed_spans(node, true, &mut removed);

    let base = node.start_byte();
    let text = node_text(node, source);
    let mut segments = Vec::new();
    let mut last = 0;
    for (start, end) in removed {
        segments.push(&text[last..start - base]);
        last = end - base;
    }
    segments.push(&text[last..]);

    let mut signature = String::new();
    for segment in segments.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if needs_space(&signature, segment) {
            signature.push(' ');
        }
        signature.push_str(segment);
    }
    let signature = line_break_re().replace_all(&signature, " ");

    format!("{signature} {{}}")
}

/// Byte spans to cut from a declarator, in source order.
///
/// `final`/`override` only count as direct children of the outer declarator.
/// Comments are cut at any depth, parameter lists included.
fn collect_removed_spans(
    node: &Node<'_>,
    outermost: bool,
    spans: &mut Vec<(usize, usize)>,
) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match NodeKind::of(&child) {
            NodeKind::Comment => spans.push((child.start_byte(), child.end_byte())),
            NodeKind::VirtualSpecifier if outermost => spans.push((child.start_byte(), child.end_byte())),
            _ => collect_removed_spans(&child, false, spans),
        }
    }
}

/// Space between two rejoined segments, except just inside brackets and
/// before a separator.
fn needs_space(
    before: &str,
    after: &str,
) -> bool {
    !before.is_empty() && !before.ends_with(['(', '<', '[']) && !after.starts_with([')', '>', ']', ',', ';'])
}

fn scope_prefix<S: AsRef<str>>(names: &[S]) -> String {
    let mut prefix = String::new();
    for name in names {
        prefix.push_str(name.as_ref());
        prefix.push_str("::");
    }
    prefix
}

/// `ns::inner::` for `["ns", "inner"]`, empty for no names.
pub fn namespace_prefix<S: AsRef<str>>(names: &[S]) -> String {
    scope_prefix(names)
}

/// `Outer::Inner::` for `["Outer", "Inner"]`, empty for no names.
pub fn class_prefix<S: AsRef<str>>(names: &[S]) -> String {
    scope_prefix(names)
}

pub fn classifier_prefix<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut prefix = String::new();
    for token in tokens {
        let token = token.as_ref();
        if is_declaration_only(token) {
            continue;
        }
        prefix.push_str(token);
        if !TIGHT_TOKENS.contains(&token) {
            prefix.push(' ');
        }
    }
    prefix
}

fn is_declaration_only(token: &str) -> bool {
    // `explicit(expr)` is the conditional form.
    DECLARATION_ONLY_SPECIFIERS.contains(&token) || token.starts_with("explicit(")
}

/// Classifiers, then namespaces, then classes, then the signature with its body.
pub fn render_definition(
    descriptor: &DefinitionDescriptor<'_>,
    source: &str,
) -> String {
    let texts = |nodes: &[Node<'_>]| nodes.iter().map(|node| node_text(node, source)).collect::<Vec<_>>();

    let mut rendered = classifier_prefix(&texts(&descriptor.classifier_tokens));
    rendered.push_str(&namespace_prefix(&texts(&descriptor.namespace_names)));
    rendered.push_str(&class_prefix(&texts(&descriptor.class_names)));
    rendered.push_str(&declarator_text(&descriptor.declarator, source));
    rendered
}

#[cfg(test)]
#[path = "../../tests/src/definition/render_tests.rs"]
mod tests;
