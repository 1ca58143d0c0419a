/// Number of UTF-16 code units before `byte_offset` in `line`.
///
/// Offsets past the end clamp to the line length; offsets inside a multi-byte
/// character round down to the character start.
pub fn utf16_column_of_byte_offset(
    line: &str,
    byte_offset: usize,
) -> u32 {
    let mut end = byte_offset.min(line.len());
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    line[..end].encode_utf16().count() as u32
}

#[cfg(test)]
#[path = "../tests/src/text_pos_tests.rs"]
mod tests;
