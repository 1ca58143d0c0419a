use lsp_types::{Location, Url};
use tracing::debug;
use tree_sitter::Node;

use crate::{
    client::{DefinitionClient, DefinitionReply},
    document::Buffer,
    editor::{Editor, NotifyLevel},
    ide::{
        Range, intersects,
        lsp::{ide_position_to_lsp, lsp_range_to_ide},
    },
    syntax::node_range,
};

/// Ask the first capable language server whether `declarator` is already
/// defined somewhere other than at the declaration itself.
///
/// Every failure mode answers `false` so a stub is still offered.
pub fn has_definition(
    clients: &mut [Box<dyn DefinitionClient>],
    editor: &mut dyn Editor,
    buffer: &Buffer,
    declarator: &Node<'_>,
) -> bool {
    let Some(client) = clients.iter_mut().find(|client| client.supports_definition()) else {
        editor.notify(
            NotifyLevel::Warn,
            "No connected language server supports go-to-definition; assuming declarations are undefined",
        );
        return false;
    };

    let own_range = buffer.range_to_utf16(node_range(declarator));
    let position = ide_position_to_lsp(own_range.start);

    match client.find_definition(&buffer.uri, position) {
        DefinitionReply::TimedOut => {
            editor.notify(
                NotifyLevel::Warn,
                &format!("{}: definition request at {}:{} timed out", client.name(), position.line + 1, position.character + 1),
            );
            false
        },
        DefinitionReply::Error {
            code,
            message,
        } => {
            editor.notify(NotifyLevel::Warn, &format!("{}: definition request failed ({code}): {message}", client.name()));
            false
        },
        DefinitionReply::Locations(locations) => {
            let external = locations.iter().find(|location| points_elsewhere(location, &buffer.uri, &own_range));
            if let Some(location) = external {
                debug!("Definition found at {}:{}", location.uri, location.range.start.line + 1);
            }
            external.is_some()
        },
    }
}

/// A location is a self-reference when it is in the same document and
/// overlaps the declarator.
fn points_elsewhere(
    location: &Location,
    uri: &Url,
    own_range: &Range,
) -> bool {
    !same_document(&location.uri, uri) || !intersects(&lsp_range_to_ide(location.range), own_range)
}

/// Compare two document URIs, tolerating symlinks and encoding differences
/// between what we sent and what the server reports back.
fn same_document(
    a: &Url,
    b: &Url,
) -> bool {
    if a == b {
        return true;
    }
    if let (Ok(pa), Ok(pb)) = (a.to_file_path(), b.to_file_path()) {
        if pa == pb {
            return true;
        }
        if let (Ok(ca), Ok(cb)) = (pa.canonicalize(), pb.canonicalize()) {
            return ca == cb;
        }
    }
    false
}

#[cfg(test)]
#[path = "../../tests/src/definition/existence_tests.rs"]
mod tests;
