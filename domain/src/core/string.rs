//! String utilities for the domain layer.

/// Truncate a string to at most `max_chars` characters, appending an ellipsis
/// when anything was cut (UTF-8 safe).
pub fn excerpt(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((end, _)) => format!("{}...", &s[..end]),
    }
}
