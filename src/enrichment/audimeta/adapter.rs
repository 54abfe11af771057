//! Adapter layer: Convert Audimeta DTOs to domain models
//!
//! This is the ONLY place where Audimeta DTO types are converted to domain
//! types. If Audimeta changes its response format, only this file and
//! dto.rs need to change.

use super::dto;
use crate::enrichment::domain::{BookMetadata, collect_names, publish_year_from_date};

/// Convert an Audimeta book response into a metadata bundle.
///
/// `asin` is the identifier that was requested; it is used when the response
/// omits its own. `original_source` records where the ASIN was found.
pub fn to_metadata(response: dto::BookResponse, asin: &str, original_source: &str) -> BookMetadata {
    // Audimeta returns a list of series; the first one is the primary series
    let (series, series_number) = response
        .series
        .first()
        .map(|s| (s.name.clone(), s.position.clone()))
        .unwrap_or((None, None));

    let publish_year = response
        .release_date
        .as_deref()
        .or(response.publish_date.as_deref())
        .and_then(publish_year_from_date);

    let abridged = response
        .book_format
        .as_deref()
        .is_some_and(|f| f.to_lowercase().contains("abridged") && !f.to_lowercase().contains("unabridged"));

    BookMetadata {
        asin: Some(response.asin.unwrap_or_else(|| asin.to_string())),
        source: Some(original_source.to_string()),
        title: response.title,
        subtitle: response.subtitle,
        authors: collect_names(response.authors.iter().map(|a| a.name.as_deref())),
        narrators: collect_names(response.narrators.iter().map(|n| n.name.as_deref())),
        publisher: response.publisher,
        description: response.description,
        genres: collect_names(response.genres.iter().map(|g| g.name.as_deref())).into_vec(),
        language: response.language,
        isbn: response.isbn,
        image_url: response.image_url,
        runtime_minutes: positive_minutes(response.length_minutes),
        publish_year,
        series,
        series_number,
        explicit: response.explicit.unwrap_or(false),
        abridged,
    }
}

/// Runtime is only meaningful when positive.
fn positive_minutes(minutes: Option<i64>) -> Option<u32> {
    minutes
        .filter(|m| *m > 0)
        .and_then(|m| u32::try_from(m).ok())
}
