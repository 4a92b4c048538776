//! Collation fold for ordering user-facing text.
//!
//! Zone names are free text in whatever language the export uses, so plain
//! byte comparison misorders accented values ("Álava" after "Zamora"). The
//! fold lowercases and strips combining marks; the raw string is the tiebreak
//! so the ordering stays total and deterministic.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Case- and accent-insensitive sort key for a string.
#[must_use]
pub fn fold(value: &str) -> String {
    value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Compare two strings by folded key, raw bytes as tiebreak.
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::{compare, fold};
    use std::cmp::Ordering;

    #[test]
    fn fold_drops_case_and_accents() {
        assert_eq!(fold("Álava"), "alava");
        assert_eq!(fold("GARCÍA"), "garcia");
        assert_eq!(fold("norte"), "norte");
    }

    #[test]
    fn accented_values_sort_with_their_letter() {
        let mut zones = vec!["Zamora", "Álava", "Burgos"];
        zones.sort_by(|a, b| compare(a, b));
        assert_eq!(zones, vec!["Álava", "Burgos", "Zamora"]);
    }

    #[test]
    fn equal_only_for_identical_strings() {
        assert_eq!(compare("Norte", "Norte"), Ordering::Equal);
        assert_ne!(compare("Norte", "norte"), Ordering::Equal);
    }
}
