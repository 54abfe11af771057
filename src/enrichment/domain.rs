//! Internal domain models for book metadata enrichment.
//!
//! These types are OUR types - they don't change when external APIs change.
//! All provider responses get converted into these types via adapters.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Author / narrator list. Almost every book has one or two.
pub type NameList = SmallVec<[String; 2]>;

/// Provider-neutral metadata bundle for a single book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookMetadata {
    /// Catalog identifier the metadata describes
    pub asin: Option<String>,
    /// Where the ASIN was originally found ("Amazon", "Audible")
    pub source: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub authors: NameList,
    pub narrators: NameList,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub genres: Vec<String>,
    pub language: Option<String>,
    pub isbn: Option<String>,
    pub image_url: Option<String>,
    /// Runtime in minutes (only set when the provider reports > 0)
    pub runtime_minutes: Option<u32>,
    /// Four-digit publication year
    pub publish_year: Option<String>,
    pub series: Option<String>,
    pub series_number: Option<String>,
    pub explicit: bool,
    pub abridged: bool,
}

impl BookMetadata {
    /// Return a copy of `self` with missing fields filled in from `other`.
    ///
    /// Values already present in `self` always win.
    pub fn merged_with(&self, other: &BookMetadata) -> BookMetadata {
        fn pick<T: Clone>(mine: &Option<T>, theirs: &Option<T>) -> Option<T> {
            mine.clone().or_else(|| theirs.clone())
        }
        fn pick_list<L: Clone + AsRef<[String]>>(mine: &L, theirs: &L) -> L {
            if mine.as_ref().is_empty() {
                theirs.clone()
            } else {
                mine.clone()
            }
        }

        BookMetadata {
            asin: pick(&self.asin, &other.asin),
            source: pick(&self.source, &other.source),
            title: pick(&self.title, &other.title),
            subtitle: pick(&self.subtitle, &other.subtitle),
            authors: pick_list(&self.authors, &other.authors),
            narrators: pick_list(&self.narrators, &other.narrators),
            publisher: pick(&self.publisher, &other.publisher),
            description: pick(&self.description, &other.description),
            genres: pick_list(&self.genres, &other.genres),
            language: pick(&self.language, &other.language),
            isbn: pick(&self.isbn, &other.isbn),
            image_url: pick(&self.image_url, &other.image_url),
            runtime_minutes: self.runtime_minutes.or(other.runtime_minutes),
            publish_year: pick(&self.publish_year, &other.publish_year),
            series: pick(&self.series, &other.series),
            series_number: pick(&self.series_number, &other.series_number),
            explicit: self.explicit || other.explicit,
            abridged: self.abridged || other.abridged,
        }
    }
}

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}").expect("valid year regex"));

/// Extract a four-digit year from a provider release date.
///
/// Providers send RFC 3339 timestamps ("2021-05-04T00:00:00.000Z") most of the
/// time; anything else falls back to the first four-digit run.
pub fn publish_year_from_date(date: &str) -> Option<String> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Some(parsed.year().to_string());
    }
    YEAR_RE.find(date).map(|m| m.as_str().to_string())
}

/// Collect non-empty names, preserving order.
pub fn collect_names<'a>(names: impl IntoIterator<Item = Option<&'a str>>) -> NameList {
    names
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

/// Errors that can occur while fetching metadata from a provider
#[derive(Debug, Clone, thiserror::Error)]
pub enum EnrichmentError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Invalid base URL for {source_name}: {url}")]
    InvalidBaseUrl { source_name: String, url: String },
}
