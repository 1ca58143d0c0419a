pub mod client;
pub mod command;
pub mod config;
pub mod definition;
pub mod document;
pub mod editor;
pub mod ide;
pub mod syntax;
pub mod text_pos;

pub use client::{DefinitionClient, DefinitionReply, StdioLanguageClient};
pub use command::{COMMAND_NAME, Context, generate_definitions};
pub use definition::{DefinitionDescriptor, build_definition, has_definition, render_definition};
pub use document::Buffer;
pub use editor::{Editor, NotifyLevel, RawSelection, TerminalEditor};
pub use syntax::{CppParser, SyntaxParser};
