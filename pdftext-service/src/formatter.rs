//! Line formatting for extracted text.

use crate::error::FormattingError;

/// Split `text` into trimmed, non-empty lines, preserving their order.
///
/// Leading and trailing whitespace is stripped per line; whitespace inside a
/// line (alignment spaces, tabs) is kept verbatim. Lines that are blank after
/// trimming are dropped.
pub fn format_lines(text: &str) -> Result<Vec<String>, FormattingError> {
    if text.is_empty() {
        return Err(FormattingError::EmptyText {
            text: text.to_string(),
        });
    }

    let line_count = text.lines().count();
    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if lines.is_empty() {
        return Err(FormattingError::NoLines {
            text: text.to_string(),
            line_count,
        });
    }

    Ok(lines)
}
