use tree_sitter::Node;

/// The tree-sitter-cpp node kinds the definition pipeline cares about.
///
/// Everything else maps to [`NodeKind::Other`] and is walked through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Declaration,
    FieldDeclaration,
    NamespaceDefinition,
    /// `class`, `struct` and `union` specifiers.
    ClassSpecifier,
    FunctionDeclarator,
    ReferenceDeclarator,
    PointerDeclarator,
    /// `final` / `override`.
    VirtualSpecifier,
    Comment,
    Other,
}

impl NodeKind {
    pub fn of(node: &Node<'_>) -> Self {
        Self::from_kind_name(node.kind())
    }

    pub fn from_kind_name(name: &str) -> Self {
        match name {
            "declaration" => Self::Declaration,
            "field_declaration" => Self::FieldDeclaration,
            "namespace_definition" => Self::NamespaceDefinition,
            "class_specifier" | "struct_specifier" | "union_specifier" => Self::ClassSpecifier,
            "function_declarator" => Self::FunctionDeclarator,
            "reference_declarator" => Self::ReferenceDeclarator,
            "pointer_declarator" => Self::PointerDeclarator,
            "virtual_specifier" => Self::VirtualSpecifier,
            "comment" => Self::Comment,
            _ => Self::Other,
        }
    }

    /// A whole declaration statement, as opposed to one of its parts.
    pub fn is_declaration(self) -> bool {
        matches!(self, Self::Declaration | Self::FieldDeclaration)
    }
}

#[cfg(test)]
#[path = "../../tests/src/syntax/kind_tests.rs"]
mod tests;
