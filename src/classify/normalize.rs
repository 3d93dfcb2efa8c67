//! Free-text canonicalization.

use deunicode::deunicode;

/// Canonicalize free text for matching.
///
/// Folds accents to ASCII, lower-cases, collapses whitespace runs and trims.
/// Total over any input; empty in, empty out.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let ascii = deunicode(text);
    let lower = ascii.to_lowercase();

    lower.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [`normalize`] over an optional field; `None` becomes the empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}
