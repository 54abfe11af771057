//! Synchronous query validation and language handling.
//!
//! Everything here runs before a request leaves the process.

use std::sync::LazyLock;

use regex::Regex;

use super::classify::{self, SearchType};
use super::error::SearchError;

static STRICT_ASIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^B[0-9A-Z]{9}$").expect("valid strict ASIN regex"));

/// A query that passed validation and is ready for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuery {
    /// The trimmed query as typed
    pub raw: String,
    pub search_type: SearchType,
    /// Query string for the backend (with `ASIN:` / `ISBN:` prefixes)
    pub backend_query: String,
}

/// Reject empty / whitespace-only queries.
pub fn require_query(raw: &str) -> Result<&str, SearchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SearchError::MissingQuery);
    }
    Ok(trimmed)
}

/// Whether `raw` (optionally `ASIN:`-prefixed) is a strict Amazon ASIN.
///
/// ISBN-10s classify as ASIN queries but do not pass this check.
pub fn is_strict_asin(raw: &str) -> bool {
    let clean = strip_asin_prefix(raw).to_ascii_uppercase();
    STRICT_ASIN_RE.is_match(&clean)
}

fn strip_asin_prefix(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.get(..5) {
        Some(head) if head.eq_ignore_ascii_case("ASIN:") => trimmed[5..].trim(),
        _ => trimmed,
    }
}

/// Validate and classify a query.
pub fn validate(raw: &str) -> Result<ValidatedQuery, SearchError> {
    let query = require_query(raw)?;
    let search_type = classify::classify(query);

    if search_type == SearchType::Asin && !is_strict_asin(query) {
        return Err(SearchError::InvalidAsin(strip_asin_prefix(query).to_string()));
    }

    Ok(ValidatedQuery {
        raw: query.to_string(),
        search_type,
        backend_query: classify::backend_query(query, search_type),
    })
}

/// Language name to Audible marketplace region.
const LANGUAGE_REGIONS: [(&str, &str); 11] = [
    ("english", "us"),
    ("english-uk", "uk"),
    ("english-ca", "ca"),
    ("english-au", "au"),
    ("english-in", "in"),
    ("german", "de"),
    ("french", "fr"),
    ("spanish", "es"),
    ("italian", "it"),
    ("portuguese", "br"),
    ("japanese", "jp"),
];

/// Fallback marketplace for unknown languages
pub const DEFAULT_REGION: &str = "us";

/// Map a result language ("english", "German", ...) to a marketplace region.
pub fn region_for_language(language: &str) -> &'static str {
    let language = language.trim();
    LANGUAGE_REGIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(language))
        .map(|(_, region)| *region)
        .unwrap_or(DEFAULT_REGION)
}
