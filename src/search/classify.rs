//! Query classification - decides whether a raw query is an ASIN, an ISBN or
//! free text.
//!
//! Classification is pure and never fails. Empty input classifies as
//! [`SearchType::Title`]; rejecting it is the caller's job.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// What kind of identifier a query carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Asin,
    Isbn,
    Title,
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchType::Asin => write!(f, "asin"),
            SearchType::Isbn => write!(f, "isbn"),
            SearchType::Title => write!(f, "title"),
        }
    }
}

/// Explicit query prefixes, matched case-insensitively.
const PREFIXES: [(&str, SearchType); 4] = [
    ("ASIN:", SearchType::Asin),
    ("ISBN:", SearchType::Isbn),
    ("AUTHOR:", SearchType::Title),
    ("TITLE:", SearchType::Title),
];

static ISBN13_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{13}$").expect("valid ISBN-13 regex"));

/// `B` + 9 alphanumerics (typical ASIN) or a 10-digit ISBN-10 ending in a
/// digit or `X`. ISBN-10s are looked up through the ASIN path.
static ASIN_OR_ISBN10_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(B[0-9A-Z]{9}|\d{9}[0-9X])$").expect("valid ASIN regex")
});

/// Classify a raw query. First match wins:
/// explicit prefix, ISBN-13, ASIN / ISBN-10 shape, otherwise title.
pub fn classify(raw: &str) -> SearchType {
    let query = raw.trim().to_uppercase();

    if let Some((_, search_type)) = PREFIXES.iter().find(|(p, _)| query.starts_with(p)) {
        return *search_type;
    }

    if ISBN13_RE.is_match(&query) {
        return SearchType::Isbn;
    }

    if ASIN_OR_ISBN10_RE.is_match(&query) {
        return SearchType::Asin;
    }

    SearchType::Title
}

/// Remove a leading `ASIN:` / `ISBN:` / `AUTHOR:` / `TITLE:` prefix.
pub fn strip_prefix(raw: &str) -> &str {
    let trimmed = raw.trim();
    for (prefix, _) in PREFIXES {
        if let Some(head) = trimmed.get(..prefix.len())
            && head.eq_ignore_ascii_case(prefix)
        {
            return trimmed[prefix.len()..].trim();
        }
    }
    trimmed
}

/// Build the query string the search backend expects.
///
/// ASIN and ISBN lookups are sent with an explicit prefix so the backend
/// does not have to re-classify them; titles go through untouched.
pub fn backend_query(raw: &str, search_type: SearchType) -> String {
    match search_type {
        SearchType::Asin => format!("ASIN:{}", strip_prefix(raw).to_ascii_uppercase()),
        SearchType::Isbn => format!("ISBN:{}", strip_prefix(raw)),
        SearchType::Title => raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify("B08G9PRS1K"), SearchType::Asin);
        assert_eq!(classify("  b08g9prs1k "), SearchType::Asin);
        assert_eq!(classify("9780547928227"), SearchType::Isbn);
        assert_eq!(classify("054792822X"), SearchType::Asin);
        assert_eq!(classify("0547928220"), SearchType::Asin);
        assert_eq!(classify("The Hobbit"), SearchType::Title);
        assert_eq!(classify("ISBN:0547928220"), SearchType::Isbn);
        assert_eq!(classify("author:Tolkien"), SearchType::Title);
        assert_eq!(classify("TITLE: B08G9PRS1K"), SearchType::Title);
        assert_eq!(classify(""), SearchType::Title);
        assert_eq!(classify("   "), SearchType::Title);
    }

    #[test]
    fn test_near_misses_are_titles() {
        assert_eq!(classify("B08G9PRS1K2"), SearchType::Title);
        assert_eq!(classify("978054792822"), SearchType::Title);
        assert_eq!(classify("A08G9PRS1K"), SearchType::Title);
        assert_eq!(classify("Dune"), SearchType::Title);
    }

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_prefix(" asin: B08G9PRS1K "), "B08G9PRS1K");
        assert_eq!(strip_prefix("Title:The Hobbit"), "The Hobbit");
        assert_eq!(strip_prefix("The Hobbit"), "The Hobbit");
        assert_eq!(strip_prefix("é"), "é");
    }

    #[test]
    fn test_backend_query() {
        assert_eq!(backend_query("asin:b08g9prs1k", SearchType::Asin), "ASIN:B08G9PRS1K");
        assert_eq!(backend_query("B08G9PRS1K", SearchType::Asin), "ASIN:B08G9PRS1K");
        assert_eq!(backend_query("9780547928227", SearchType::Isbn), "ISBN:9780547928227");
        assert_eq!(backend_query(" AUTHOR:Tolkien ", SearchType::Title), "AUTHOR:Tolkien");
    }

    proptest! {
        #[test]
        fn prop_prefix_tokens_win(rest in "\\PC{0,24}") {
            prop_assert_eq!(classify(&format!("ASIN:{rest}")), SearchType::Asin);
            prop_assert_eq!(classify(&format!("isbn:{rest}")), SearchType::Isbn);
            prop_assert_eq!(classify(&format!("Author:{rest}")), SearchType::Title);
            prop_assert_eq!(classify(&format!("TITLE:{rest}")), SearchType::Title);
        }

        #[test]
        fn prop_thirteen_digits_are_isbn(digits in "[0-9]{13}") {
            prop_assert_eq!(classify(&digits), SearchType::Isbn);
        }

        #[test]
        fn prop_classify_ignores_surrounding_whitespace(q in "\\PC{0,24}", pad in "[ \\t]{0,3}") {
            prop_assert_eq!(classify(&format!("{pad}{q}{pad}")), classify(&q));
        }
    }
}
