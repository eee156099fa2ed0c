//! Search-term escaping for name matching.
//!
//! A search term is matched against recipe names as a case-insensitive regex,
//! so every metacharacter in the term has to be escaped before the pattern is
//! built. The escaped set covers all characters the regex syntax treats
//! specially; whitespace is already literal and passes through unchanged.

use regex::{Regex, RegexBuilder};

/// Prefix every regex metacharacter in `term` with a backslash so the term
/// matches only literal occurrences.
pub fn escape_search(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(
            c,
            '-' | '['
                | ']'
                | '{'
                | '}'
                | '('
                | ')'
                | '*'
                | '+'
                | '?'
                | '.'
                | ','
                | '\\'
                | '^'
                | '$'
                | '|'
                | '#'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the case-insensitive name pattern for a search term.
pub fn name_pattern(term: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&escape_search(term))
        .case_insensitive(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_passes_plain_text_through() {
        assert_eq!(escape_search("chicken soup"), "chicken soup");
    }

    #[test]
    fn test_escape_prefixes_every_metacharacter() {
        assert_eq!(escape_search("a.b"), "a\\.b");
        assert_eq!(escape_search("(1+2)*3"), "\\(1\\+2\\)\\*3");
        assert_eq!(escape_search("50% off $5"), "50% off \\$5");
        assert_eq!(escape_search("a|b^c#d"), "a\\|b\\^c\\#d");
        assert_eq!(escape_search("x-y,z"), "x\\-y\\,z");
        assert_eq!(escape_search("[{\\}]"), "\\[\\{\\\\\\}\\]");
    }

    #[test]
    fn test_dot_matches_only_literal_dot() {
        let pattern = name_pattern("a.b").unwrap();
        assert!(pattern.is_match("a.b"));
        assert!(pattern.is_match("salsa.brava"));
        assert!(!pattern.is_match("axb"));
    }

    #[test]
    fn test_pattern_is_case_insensitive() {
        let pattern = name_pattern("Pie").unwrap();
        assert!(pattern.is_match("apple pie"));
        assert!(pattern.is_match("PIE crust"));
    }

    #[test]
    fn test_pattern_matches_substring_of_name() {
        let pattern = name_pattern("cake").unwrap();
        assert!(pattern.is_match("carrot cake with icing"));
        assert!(!pattern.is_match("carrot bread"));
    }

    #[test]
    fn test_terms_with_metacharacters_always_build() {
        for term in ["((((", "a[b", "c{2,3}", "\\", "$^|#"] {
            assert!(name_pattern(term).is_ok(), "failed to build for {term:?}");
        }
    }
}
