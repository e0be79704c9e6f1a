//! Brace-balanced block scanning.

/// Returns the block starting at `start` and ending at its matching `}`.
///
/// `start` should point at an opening brace. Every `{` and `}` in the text
/// counts, including those inside JavaScript strings, template literals and
/// comments; the scanner has no notion of lexical context. This is a known
/// limitation and changing it changes which operations are found in real
/// bundles.
///
/// Returns `None` when the text ends before the depth returns to zero, or
/// when `start` is out of bounds.
#[must_use]
pub fn balanced_block(text: &str, start: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut depth: i64 = 0;

    for (offset, &byte) in bytes.get(start..)?.iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + 1;
                    return text.get(start..end);
                }
            }
            _ => {}
        }
    }

    None
}
