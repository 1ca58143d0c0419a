//! tree-sitter parsing for C++ buffers.

pub mod declarator;
pub mod helpers;
pub mod kind;
pub mod queries;

use std::fmt::{Display, Formatter};

use tree_sitter::{Language, Parser, Tree};

pub use declarator::{find_callable_declarator, is_callable_declaration};
pub use helpers::{node_range, node_text};
pub use kind::NodeKind;
pub use queries::list_declaration_nodes;

pub fn cpp_language() -> Language {
    tree_sitter_cpp::LANGUAGE.into()
}

/// Produces a syntax tree for a buffer.
pub trait SyntaxParser {
    fn parse(
        &mut self,
        source: &str,
    ) -> Result<Tree, SyntaxError>;
}

pub struct CppParser {
    parser: Parser,
}

impl CppParser {
    pub fn new() -> Result<Self, SyntaxError> {
        let mut parser = Parser::new();
        parser.set_language(&cpp_language()).map_err(|e| SyntaxError::Language(e.to_string()))?;
        Ok(Self {
            parser,
        })
    }
}

impl SyntaxParser for CppParser {
    fn parse(
        &mut self,
        source: &str,
    ) -> Result<Tree, SyntaxError> {
        self.parser.parse(source, None).ok_or(SyntaxError::ParseFailed)
    }
}

#[derive(Debug)]
pub enum SyntaxError {
    Language(String),
    ParseFailed,
    Query(String),
}

impl Display for SyntaxError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Language(reason) => write!(f, "C++ grammar is not available: {reason}"),
            Self::ParseFailed => write!(f, "failed to parse buffer"),
            Self::Query(reason) => write!(f, "invalid declaration query: {reason}"),
        }
    }
}

impl std::error::Error for SyntaxError {}
