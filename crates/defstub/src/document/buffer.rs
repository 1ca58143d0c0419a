use std::path::Path;

use lsp_types::Url;

use crate::{
    ide::{Position, Range},
    text_pos::utf16_column_of_byte_offset,
};

/// Snapshot of the source buffer a command runs against.
///
/// Positions produced by the syntax tree use byte columns; the language
/// server speaks UTF-16. The buffer translates between the two.
#[derive(Debug, Clone)]
pub struct Buffer {
    pub uri: Url,
    pub text: String,
    /// Line start byte offsets.
    line_offsets: Vec<usize>,
}

impl Buffer {
    pub fn new(
        uri: Url,
        text: String,
    ) -> Self {
        let line_offsets = Self::compute_line_offsets(&text);
        Self {
            uri,
            text,
            line_offsets,
        }
    }

    /// Read a buffer from disk. The path is made absolute so it can be
    /// expressed as a `file://` URI.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let absolute = std::path::absolute(path)?;
        let uri = Url::from_file_path(&absolute).map_err(|()| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("cannot express {} as a file URI", absolute.display()),
            )
        })?;
        Ok(Self::new(uri, text))
    }

    /// Text of a 0-based line without its line terminator.
    pub fn line_text(
        &self,
        line: usize,
    ) -> Option<&str> {
        let start = *self.line_offsets.get(line)?;
        let end = self.line_offsets.get(line + 1).copied().unwrap_or(self.text.len());
        let slice = &self.text[start..end];
        Some(slice.trim_end_matches('\n').trim_end_matches('\r'))
    }

    /// Convert a byte-column position into the language server's UTF-16 columns.
    pub fn to_utf16(
        &self,
        position: Position,
    ) -> Position {
        match self.line_text(position.line as usize) {
            Some(line) => Position::new(position.line, utf16_column_of_byte_offset(line, position.character as usize)),
            None => position,
        }
    }

    pub fn range_to_utf16(
        &self,
        range: Range,
    ) -> Range {
        Range {
            start: self.to_utf16(range.start),
            end: self.to_utf16(range.end),
            block: range.block,
        }
    }

    fn compute_line_offsets(text: &str) -> Vec<usize> {
        let mut offsets = vec![0];
        for (idx, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(idx + 1);
            }
        }
        offsets
    }
}

#[cfg(test)]
#[path = "../../tests/src/document/buffer_tests.rs"]
mod tests;
