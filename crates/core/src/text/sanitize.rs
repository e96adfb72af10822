//! Content filtering applied to recognizer output before it reaches the index.

/// Keeps printable ASCII (`0x20..=0x7E`) and drops everything else,
/// including tabs, newlines and non-ASCII glyphs the recognizer emitted.
pub fn retain_printable_ascii(text: &str) -> String {
    text.chars().filter(|c| (' '..='~').contains(c)).collect()
}
