//! String truncation helpers
//!
//! Limits count Unicode scalar values, not bytes, so truncation never splits
//! a multi-byte character.

const ELLIPSIS: &str = "...";

/// Render a character as a string; the NUL character renders as empty.
pub fn rune_to_string(c: char) -> String {
    if c == '\0' {
        String::new()
    } else {
        c.to_string()
    }
}

/// Truncate `text` to at most `limit` characters, ending in `...` when cut.
///
/// A limit of 3 or less always yields `...`.
pub fn ellipsis_string(text: &str, limit: usize) -> String {
    let ellipsis_len = ELLIPSIS.len();
    if limit <= ellipsis_len {
        return ELLIPSIS.to_string();
    }

    if text.chars().count() <= limit {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(limit - ellipsis_len).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Keep at most `limit` characters of `text`.
pub fn truncate_string(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
