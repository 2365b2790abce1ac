//! Text folding for keyword matching.
//!
//! Chat input arrives with or without accents ("lesão" / "lesao",
//! "manhã" / "manha"). Every keyword rule compares folded text:
//! - Unicode NFD decomposition
//! - Combining marks dropped
//! - Lowercase conversion
//! - Surrounding whitespace trimmed

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold `s` to lowercase ASCII-ish text with diacritics removed.
///
/// ```
/// use fitness_intake::text::fold;
///
/// assert_eq!(fold("  Lesão no Joelho "), "lesao no joelho");
/// assert_eq!(fold("Manhã"), "manha");
/// ```
pub fn fold(s: &str) -> String {
    s.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether the already-folded `haystack` contains any of `needles`.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
