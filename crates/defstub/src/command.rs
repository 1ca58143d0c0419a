//! The `GenerateDefinitions` command.

use std::fmt::{Display, Formatter};

use tracing::debug;

use crate::{
    client::DefinitionClient,
    definition::{build_definition, has_definition, render_definition},
    document::Buffer,
    editor::{Editor, NotifyLevel},
    ide::{intersects, normalize_selection},
    syntax::{SyntaxParser, find_callable_declarator, list_declaration_nodes, node_range, node_text},
};

pub const COMMAND_NAME: &str = "GenerateDefinitions";

/// Collaborators for one invocation of the command.
pub struct Context<'a> {
    pub buffer: &'a Buffer,
    pub parser: &'a mut dyn SyntaxParser,
    pub clients: &'a mut [Box<dyn DefinitionClient>],
    pub editor: &'a mut dyn Editor,
    /// Register the generated stubs are written to.
    pub register: &'a str,
}

/// Generate definition stubs for every undefined callable declaration
/// intersecting the editor selection.
///
/// Returns the number of stubs written. Nothing is written when there are none.
pub fn generate_definitions(ctx: &mut Context<'_>) -> Result<usize, CommandError> {
    let Some(raw) = ctx.editor.selection() else {
        debug!("{COMMAND_NAME}: no selection");
        return Ok(0);
    };
    let selection = normalize_selection(raw.start, raw.end, raw.mode);

    let source = ctx.buffer.text.as_str();
    let tree = match ctx.parser.parse(source) {
        Ok(tree) => tree,
        Err(error) => {
            ctx.editor.notify(NotifyLevel::Error, &format!("{COMMAND_NAME}: {error}"));
            return Ok(0);
        },
    };
    let declarations = match list_declaration_nodes(&tree, source) {
        Ok(declarations) => declarations,
        Err(error) => {
            ctx.editor.notify(NotifyLevel::Error, &format!("{COMMAND_NAME}: {error}"));
            return Ok(0);
        },
    };
    debug!("{} callable declarations in {}", declarations.len(), ctx.buffer.uri);

    let mut stubs = Vec::new();
    for declaration in declarations {
        if !intersects(&node_range(&declaration), &selection) {
            continue;
        }
        let Some(declarator) = find_callable_declarator(declaration) else {
            continue;
        };
        if has_definition(ctx.clients, ctx.editor, ctx.buffer, &declarator) {
            debug!("Skipping {}: already defined", node_text(&declarator, source));
            continue;
        }
        if let Some(descriptor) = build_definition(declaration) {
            stubs.push(render_definition(&descriptor, source));
        }
    }

    if stubs.is_empty() {
        return Ok(0);
    }

    ctx.editor.write_register(ctx.register, &stubs).map_err(|source| CommandError::Register {
        register: ctx.register.to_string(),
        source,
    })?;
    let message = format!("{} definition(s) written to register `{}`", stubs.len(), ctx.register);
    ctx.editor.notify(NotifyLevel::Info, &message);

    Ok(stubs.len())
}

#[derive(Debug)]
pub enum CommandError {
    Register {
        register: String,
        source: std::io::Error,
    },
}

impl Display for CommandError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Register {
                register,
                source,
            } => write!(f, "failed to write register `{register}`: {source}"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Register {
                source, ..
            } => Some(source),
        }
    }
}

#[cfg(test)]
#[path = "../tests/src/command_tests.rs"]
mod tests;
