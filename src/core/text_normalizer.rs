//! Text Normalization
//!
//! Canonicalizes OCR output and ingredient names before matching:
//! lowercase, punctuation turned into separators, whitespace collapsed.

/// Normalize text into its comparable form
///
/// Every character that is not an ASCII lowercase letter, ASCII digit or
/// whitespace (after lowercasing) becomes a space, so punctuation splits
/// words instead of gluing them together. The result never has leading,
/// trailing or repeated spaces.
pub fn normalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_space && !result.is_empty() {
                result.push(' ');
            }
            pending_space = false;
            result.push(c);
        } else {
            pending_space = true;
        }
    }

    result
}

/// Split already-normalized text into words
pub fn tokens(normalized: &str) -> Vec<&str> {
    normalized.split(' ').filter(|word| !word.is_empty()).collect()
}
