//! Editor-agnostic positions, ranges and selection normalization.

use std::{fmt, str::FromStr};

/// Column used for the end of a line-wise selection.
pub const MAX_COLUMN: u32 = i32::MAX as u32;

/// A 0-based `(line, character)` pair.
///
/// Ordering is lexicographic: line first, then character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(
        line: u32,
        character: u32,
    ) -> Self {
        Self {
            line,
            character,
        }
    }
}

impl From<tree_sitter::Point> for Position {
    fn from(point: tree_sitter::Point) -> Self {
        Self::new(point.row as u32, point.column as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
    /// Rectangular (column-bounded) selection rather than a linear span.
    pub block: bool,
}

impl Range {
    pub const fn new(
        start: Position,
        end: Position,
    ) -> Self {
        Self {
            start,
            end,
            block: false,
        }
    }

    pub const fn block(
        start: Position,
        end: Position,
    ) -> Self {
        Self {
            start,
            end,
            block: true,
        }
    }

    pub fn intersects(
        &self,
        other: &Range,
    ) -> bool {
        intersects(self, other)
    }
}

/// How the editor selection was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionMode {
    #[default]
    Char,
    Line,
    Block,
}

impl FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Vim's `visualmode()` letters are case-sensitive.
        match s.trim() {
            "v" => return Ok(Self::Char),
            "V" => return Ok(Self::Line),
            "\u{16}" => return Ok(Self::Block),
            _ => {},
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "char" | "charwise" => Ok(Self::Char),
            "line" | "linewise" => Ok(Self::Line),
            "block" | "blockwise" => Ok(Self::Block),
            other => Err(format!("unknown selection mode `{other}` (expected char, line or block)")),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Self::Char => "char",
            Self::Line => "line",
            Self::Block => "block",
        };
        f.write_str(name)
    }
}

/// A 1-based cursor mark as reported by an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawPosition {
    pub line: u32,
    pub column: u32,
}

impl RawPosition {
    pub const fn new(
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            line,
            column,
        }
    }

    fn to_position(self) -> Position {
        Position::new(self.line.saturating_sub(1), self.column.saturating_sub(1))
    }
}

impl FromStr for RawPosition {
    type Err = String;

    /// Parses `LINE:COLUMN`, both 1-based.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (line, column) = s.split_once(':').ok_or_else(|| format!("expected LINE:COLUMN, got `{s}`"))?;
        let line = line.trim().parse::<u32>().map_err(|e| format!("invalid line in `{s}`: {e}"))?;
        let column = column.trim().parse::<u32>().map_err(|e| format!("invalid column in `{s}`: {e}"))?;
        Ok(Self::new(line, column))
    }
}

/// Turn two raw, possibly reversed, editor marks into a 0-based range.
pub fn normalize_selection(
    raw_start: RawPosition,
    raw_end: RawPosition,
    mode: SelectionMode,
) -> Range {
    let mut start = raw_start.to_position();
    let mut end = raw_end.to_position();
    if end < start {
        std::mem::swap(&mut start, &mut end);
    }

    if mode == SelectionMode::Line {
        start.character = 0;
        end.character = MAX_COLUMN;
    }

    Range {
        start,
        end,
        block: mode == SelectionMode::Block,
    }
}

/// Two ranges intersect unless one lies strictly before the other.
///
/// Touching boundaries count as intersecting. Block ranges are compared as
/// if they were linear.
pub fn intersects(
    r1: &Range,
    r2: &Range,
) -> bool {
    !(r1.end < r2.start || r1.start > r2.end)
}

#[cfg(test)]
#[path = "../../tests/src/ide/range_tests.rs"]
mod tests;
