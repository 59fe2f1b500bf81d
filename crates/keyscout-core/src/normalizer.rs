//! Normalizer — canonical keyword form shared by querying, export and saved lists.
//!
//! Dataset keywords may carry a descriptive suffix after ` – ` (space, en
//! dash, space). The suffix is ignored for equality and display.

/// Separator between a keyword and its trailing annotation.
pub const ANNOTATION_SEPARATOR: &str = " – ";

/// Strip the annotation suffix from `raw`.
///
/// Returns the text before the first separator, trimmed. Strings without a
/// separator are returned unchanged, surrounding whitespace included.
pub fn normalize(raw: &str) -> &str {
    match raw.split_once(ANNOTATION_SEPARATOR) {
        Some((head, _)) => head.trim(),
        None => raw,
    }
}
