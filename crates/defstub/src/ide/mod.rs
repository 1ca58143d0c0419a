//! Positions and ranges shared by the syntax layer, the editor and the
//! language-server client.

pub mod lsp;
pub mod range;

pub use range::{MAX_COLUMN, Position, Range, RawPosition, SelectionMode, intersects, normalize_selection};
