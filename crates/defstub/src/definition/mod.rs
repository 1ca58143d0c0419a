//! Declaration-to-definition synthesis: scope reconstruction, existence
//! checks against the language server, and stub rendering.

mod existence;
mod render;
mod scope;

pub use existence::has_definition;
pub use render::{class_prefix, classifier_prefix, declarator_text, namespace_prefix, render_definition};
pub use scope::{DefinitionDescriptor, build_definition};
