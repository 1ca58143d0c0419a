use lsp_types::{GotoDefinitionResponse, Location};

use crate::ide::range::{Position, Range};

pub fn lsp_position_to_ide(position: lsp_types::Position) -> Position {
    Position::new(position.line, position.character)
}

pub fn ide_position_to_lsp(position: Position) -> lsp_types::Position {
    lsp_types::Position::new(position.line, position.character)
}

pub fn lsp_range_to_ide(range: lsp_types::Range) -> Range {
    Range::new(lsp_position_to_ide(range.start), lsp_position_to_ide(range.end))
}

/// Flatten any shape of `textDocument/definition` response into plain locations.
///
/// Location links are reduced to their target selection range, which is the
/// span of the defined name.
pub fn definition_response_locations(response: Option<GotoDefinitionResponse>) -> Vec<Location> {
    match response {
        None => Vec::new(),
        Some(GotoDefinitionResponse::Scalar(location)) => vec![location],
        Some(GotoDefinitionResponse::Array(locations)) => locations,
        Some(GotoDefinitionResponse::Link(links)) => links
            .into_iter()
            .map(|link| Location {
                uri: link.target_uri,
                range: link.target_selection_range,
            })
            .collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/src/ide/lsp_tests.rs"]
mod tests;
