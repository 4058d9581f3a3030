//! Line-oriented helpers shared by the buffer controller and the editor surface.

use crate::app::domain::caret::Caret;

/// Number of lines in `text`: one more than its newline count, so
/// `"a\n"` has two lines and `""` has one.
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count() + 1
}

/// Everything from 0-based line `index` onward, joined back with `\n`.
/// Empty when `index` is past the last line.
pub fn lines_from(text: &str, index: usize) -> &str {
    if index == 0 {
        return text;
    }
    match line_number_to_byte_position(text, index + 1) {
        Some(pos) => &text[pos..],
        None => "",
    }
}

/// The first `count` lines of `text`, without the newline that ends the last one.
pub fn leading_lines(text: &str, count: usize) -> &str {
    if count == 0 {
        return "";
    }
    match line_number_to_byte_position(text, count + 1) {
        Some(pos) => &text[..pos - 1],
        None => text,
    }
}

/// Convert a 1-based line number to a byte position in the text
///
/// Returns None if the line number is 0 or beyond the end of the text.
pub fn line_number_to_byte_position(text: &str, line: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    if line == 1 {
        return Some(0);
    }

    let mut current_line = 1;
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' {
            current_line += 1;
            if current_line == line {
                return Some(i + 1);
            }
        }
    }
    None
}

/// Drop whole blank (whitespace-only) lines from the start of `text`.
/// A final line without a newline is kept even if blank.
pub fn trim_leading_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some(nl) = rest.find('\n') {
        if rest[..nl].trim().is_empty() {
            rest = &rest[nl + 1..];
        } else {
            break;
        }
    }
    rest
}

/// Byte offset to caret. Columns count chars, not bytes.
pub fn caret_at_offset(text: &str, offset: usize) -> Caret {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &text[..offset];
    let line = line_count(before);
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    Caret::new(line, column)
}

/// Caret to byte offset, clamping the line to the text and the column to
/// the end of that line.
pub fn offset_of_caret(text: &str, caret: Caret) -> usize {
    let total = line_count(text);
    let line = caret.line.clamp(1, total);
    let start = line_number_to_byte_position(text, line).unwrap_or(0);
    let line_text = &text[start..];
    let line_text = match line_text.find('\n') {
        Some(nl) => &line_text[..nl],
        None => line_text,
    };
    let column_offset = line_text
        .char_indices()
        .nth(caret.column.saturating_sub(1))
        .map_or(line_text.len(), |(i, _)| i);
    start + column_offset
}
