//! Core data models shared by search, filtering, enrichment and scoring.
//!
//! Defines the primary values: [`SearchResult`], [`SourceConfiguration`] and
//! [`QualityScore`]. All of them mirror the JSON the search backend speaks
//! (camelCase field names) so they can be deserialized straight off the wire.
//!
//! Search results are treated as immutable values: enrichment never mutates a
//! result in place, it produces a new one via [`SearchResult::with_enrichment`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enrichment::BookMetadata;
use crate::enrichment::domain::collect_names;
use crate::search::filters::heuristics;

/// A single audiobook candidate returned by the raw search backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    /// Backend identifier (indexer GUID, catalog id, ...)
    pub id: String,
    /// Book title
    pub title: String,
    /// Author (the backend calls it "artist")
    pub artist: String,
    /// Album or series name reported by the indexer
    pub album: String,
    pub category: String,
    /// Format string ("M4B", "Paperback", "Audible Audiobook", ...)
    pub format: String,
    pub quality: String,
    /// Release size in bytes
    #[serde(deserialize_with = "lenient::count")]
    pub size: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub seeders: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub leechers: u32,
    pub magnet_link: String,
    pub torrent_url: String,
    pub nzb_url: String,
    /// Provider the result came from (indexer or catalog name)
    pub source: String,
    pub published_date: String,

    // Optional enrichment fields
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub language: Option<String>,
    /// Runtime in minutes
    #[serde(deserialize_with = "lenient::optional_count")]
    pub runtime: Option<u32>,
    pub narrator: Option<String>,
    pub image_url: Option<String>,
    pub asin: Option<String>,
    pub series: Option<String>,
    pub series_number: Option<String>,

    /// Read through [`SearchResult::is_enriched`], which also requires a
    /// non-blank `metadata_source`.
    pub(crate) is_enriched: bool,
    /// Name of the metadata provider that enriched this result
    pub(crate) metadata_source: Option<String>,
}

impl SearchResult {
    /// Create a bare result with just a title and author.
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            ..Default::default()
        }
    }

    /// Whether a metadata provider enriched this result.
    ///
    /// Always false when no metadata source is recorded, even if the wire
    /// payload claimed otherwise.
    pub fn is_enriched(&self) -> bool {
        self.is_enriched && self.metadata_source().is_some()
    }

    /// The metadata provider name, if one is recorded and not blank.
    pub fn metadata_source(&self) -> Option<&str> {
        self.metadata_source
            .as_deref()
            .filter(|source| !source.trim().is_empty())
    }

    /// Mark the result as enriched by `source`.
    ///
    /// A blank source name leaves the result untouched.
    pub fn mark_enriched(self, source: impl Into<String>) -> Self {
        let source = source.into();
        if source.trim().is_empty() {
            return self;
        }
        Self {
            metadata_source: Some(source),
            is_enriched: true,
            ..self
        }
    }

    /// What the backend already told us about the book, as metadata.
    ///
    /// Used to fill gaps in what a provider returns.
    pub fn known_metadata(&self) -> BookMetadata {
        fn text(value: &str) -> Option<String> {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }

        BookMetadata {
            asin: self.asin.clone(),
            source: text(&self.source),
            title: text(&self.title),
            authors: collect_names([Some(self.artist.as_str())]),
            narrators: collect_names(
                self.narrator.as_deref().into_iter().flat_map(|n| n.split(',')).map(Some),
            ),
            publisher: self.publisher.clone(),
            description: self.description.clone(),
            language: self.language.clone(),
            image_url: self.image_url.clone(),
            runtime_minutes: self.runtime.filter(|m| *m > 0),
            series: self.series.clone(),
            series_number: self.series_number.clone(),
            ..Default::default()
        }
    }

    /// Produce a new result with `metadata` from `source_name` applied.
    ///
    /// Metadata values win over what the backend reported, except for titles
    /// and authors that are blank or obvious scraping noise, which keep the
    /// original value.
    pub fn with_enrichment(self, metadata: &BookMetadata, source_name: &str) -> Self {
        if source_name.trim().is_empty() {
            return self;
        }

        let mut next = self;

        if let Some(title) = metadata.title.as_deref()
            && !heuristics::is_title_placeholder(title)
        {
            next.title = title.to_string();
        }

        if let Some(author) = metadata.authors.first()
            && !heuristics::is_author_noise(author)
        {
            next.artist = author.clone();
        }

        if !metadata.narrators.is_empty() {
            next.narrator = Some(metadata.narrators.join(", "));
        }

        next.runtime = metadata.runtime_minutes.or(next.runtime);
        next.image_url = metadata.image_url.clone().or(next.image_url);
        next.publisher = metadata.publisher.clone().or(next.publisher);
        next.language = metadata.language.clone().or(next.language);
        next.description = metadata.description.clone().or(next.description);
        next.series = metadata.series.clone().or(next.series);
        next.series_number = metadata.series_number.clone().or(next.series_number);
        next.asin = metadata.asin.clone().or(next.asin);

        next.mark_enriched(source_name)
    }
}

/// Forgiving decoders for numeric fields.
///
/// Indexers send negative sentinels, floats and numeric strings for counts.
/// None of that should make a whole response undecodable.
mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(i64),
        Float(f64),
        Text(String),
    }

    impl Number {
        fn as_i64(&self) -> Option<i64> {
            match self {
                Number::Int(n) => Some(*n),
                Number::Float(f) if f.is_finite() => Some(*f as i64),
                Number::Float(_) => None,
                Number::Text(s) => s.trim().parse().ok(),
            }
        }
    }

    /// A non-negative count. Anything negative or unreadable becomes 0.
    pub fn count<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<i64> + Default,
    {
        Ok(optional_count(deserializer)?.unwrap_or_default())
    }

    /// An optional non-negative count. Negative or unreadable values are
    /// treated as absent.
    pub fn optional_count<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<i64>,
    {
        let value = Option::<Number>::deserialize(deserializer)?;
        Ok(value
            .as_ref()
            .and_then(Number::as_i64)
            .filter(|n| *n >= 0)
            .and_then(|n| T::try_from(n).ok()))
    }
}

/// A configured external metadata endpoint.
///
/// Priority is the position in the list the caller hands over; there is no
/// separate priority field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SourceConfiguration {
    /// Display name, reported back when this source wins
    pub name: String,
    /// Base URL used both for requests and strategy selection
    pub base_url: String,
    /// Disabled sources are dropped before enrichment
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl SourceConfiguration {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            enabled: true,
        }
    }
}

/// Upstream quality score for a search result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualityScore {
    /// Total score as reported by the scorer
    pub total_score: i64,
    /// Named signed contributions ("Seeders", "Format", "Quality", ...)
    ///
    /// `Quality` is special: it carries the raw quality value, not a delta.
    pub score_breakdown: BTreeMap<String, i64>,
    pub rejection_reasons: Vec<String>,
    /// Explicit rejection flag set by the scorer
    pub is_rejected: bool,
    /// Prowlarr-style composite score, when the scorer produced one
    pub smart_score: Option<i64>,
    /// Raw (un-normalized) components of the composite score
    pub smart_score_breakdown: BTreeMap<String, i64>,
}

impl QualityScore {
    /// Create a score with a total and contribution map.
    pub fn new<K: Into<String>>(
        total_score: i64,
        breakdown: impl IntoIterator<Item = (K, i64)>,
    ) -> Self {
        Self {
            total_score,
            score_breakdown: breakdown.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            ..Default::default()
        }
    }

    /// A score counts as rejected when negative or explicitly flagged.
    pub fn rejected(&self) -> bool {
        self.total_score < 0 || self.is_rejected
    }
}
