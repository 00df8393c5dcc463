//! Query and document tokenization.
//!
//! Lower-cases the text, treats every character outside `[a-z0-9]` as a
//! separator and drops short tokens. There is no stemming and no Unicode
//! folding: matching downstream is purely substring based.

/// Tokens shorter than this are noise ("a", "to", "is").
pub const MIN_TOKEN_LEN: usize = 3;

/// Split `text` into lower-case word tokens.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|token| token.len() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}
