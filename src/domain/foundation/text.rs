//! Character-bounded text helpers.
//!
//! Every length limit in the domain (thesis 500, error detail 200, response
//! body 300, attachment context 8000) counts Unicode scalar values, never
//! bytes, so Cyrillic text is cut at the same visible length as Latin text.

/// Returns at most `max_chars` leading characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
