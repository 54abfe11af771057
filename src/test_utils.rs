//! Test utilities and fixtures for book-scout tests.
//!
//! This module provides common result fixtures and a temp config helper to
//! reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use book_scout::test_utils::{fixture_results, result};
//!
//! #[test]
//! fn test_something() {
//!     let results = fixture_results();
//!     let custom = SearchResult { runtime: Some(600), ..result("Dune", "Frank Herbert") };
//! }
//! ```

use std::path::PathBuf;

use tempfile::TempDir;

use crate::model::SearchResult;

/// Creates a bare result with a title and author.
///
/// Customize with struct update syntax:
///
/// ```ignore
/// let narrated = SearchResult {
///     narrator: Some("Ray Porter".to_string()),
///     ..result("Project Hail Mary", "Andy Weir")
/// };
/// ```
pub fn result(title: &str, artist: &str) -> SearchResult {
    SearchResult::new(title, artist)
}

/// A realistic mixed backend answer.
///
/// Keeps "Project Hail Mary", "The Martian" and "Artemis" through the
/// standard filter pipeline and drops the rest for three different reasons.
pub fn fixture_results() -> Vec<SearchResult> {
    vec![
        SearchResult {
            id: "1".to_string(),
            narrator: Some("Ray Porter".to_string()),
            runtime: Some(970),
            asin: Some("B08G9PRS1K".to_string()),
            seeders: 42,
            ..result("Project Hail Mary", "Andy Weir")
        },
        SearchResult {
            id: "2".to_string(),
            ..result("Project Hail Mary Kindle Edition", "Andy Weir")
        },
        SearchResult {
            id: "3".to_string(),
            asin: Some("B00B5HZGUG".to_string()),
            ..result("The Martian", "Andy Weir")
        },
        SearchResult {
            id: "4".to_string(),
            ..result("", "Andy Weir")
        },
        SearchResult {
            id: "5".to_string(),
            format: "Paperback".to_string(),
            ..result("The Andy Weir Collection: 3 Book Box Set", "Andy Weir")
        },
        SearchResult {
            id: "6".to_string(),
            format: "M4B".to_string(),
            ..result("Artemis", "Andy Weir")
        },
    ]
}

/// Creates a temp directory and the path of a config file inside it.
///
/// Keep the TempDir alive for the duration of your test.
pub fn temp_config_path() -> (PathBuf, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("book-scout").join("config.toml");
    (path, dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_results_are_distinct() {
        let results = fixture_results();
        assert_eq!(results.len(), 6);
        let mut ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_enrichment_fields_settable_from_fixtures() {
        let claimed = SearchResult {
            is_enriched: true,
            metadata_source: None,
            ..result("Dune", "Frank Herbert")
        };
        assert!(!claimed.is_enriched());

        let enriched = SearchResult {
            metadata_source: Some("Audnexus".to_string()),
            ..claimed
        };
        assert!(enriched.is_enriched());
    }

    #[test]
    fn test_temp_config_path_is_inside_dir() {
        let (path, dir) = temp_config_path();
        assert!(path.starts_with(dir.path()));
        assert!(!path.exists());
    }
}
