//! Adapter layer: Convert Audnexus DTOs to domain models
//!
//! This is the ONLY place where Audnexus DTO types are converted to domain
//! types.

use super::dto;
use crate::enrichment::domain::{BookMetadata, collect_names, publish_year_from_date};

/// Convert an Audnexus book response into a metadata bundle.
pub fn to_metadata(response: dto::BookResponse, asin: &str, original_source: &str) -> BookMetadata {
    // Primary series first, secondary only when there is no primary
    let (series, series_number) = response
        .series_primary
        .as_ref()
        .or(response.series_secondary.as_ref())
        .map(|s| (s.name.clone(), s.position.clone()))
        .unwrap_or((None, None));

    // Release date first, copyright year as a fallback
    let publish_year = match response.release_date.as_deref() {
        Some(date) if !date.trim().is_empty() => publish_year_from_date(date),
        _ => response.copyright.map(|year| year.to_string()),
    };

    let abridged = response
        .format_type
        .as_deref()
        .is_some_and(|f| f.eq_ignore_ascii_case("abridged"));

    BookMetadata {
        asin: Some(response.asin.unwrap_or_else(|| asin.to_string())),
        source: Some(original_source.to_string()),
        title: response.title,
        subtitle: response.subtitle,
        authors: collect_names(response.authors.iter().map(|a| a.name.as_deref())),
        narrators: collect_names(response.narrators.iter().map(|n| n.name.as_deref())),
        publisher: response.publisher_name,
        description: response.description.or(response.summary),
        genres: collect_names(response.genres.iter().map(|g| g.name.as_deref())).into_vec(),
        language: response.language,
        isbn: response.isbn,
        image_url: response.image,
        runtime_minutes: response
            .runtime_length_min
            .filter(|m| *m > 0)
            .and_then(|m| u32::try_from(m).ok()),
        publish_year,
        series,
        series_number,
        explicit: response.is_adult.unwrap_or(false),
        abridged,
    }
}
