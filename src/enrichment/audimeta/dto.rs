//! Audimeta API Data Transfer Objects
//!
//! These types match what the Audimeta `/book/{asin}` endpoint returns.
//! DO NOT use these types outside the audimeta module - convert to domain types.
//!
//! API Reference: https://audimeta.de/api-docs
//!
//! Example response (trimmed):
//! ```json
//! {
//!   "asin": "B08G9PRS1K",
//!   "title": "Project Hail Mary",
//!   "authors": [{"asin": "B00G0WYW92", "name": "Andy Weir", "region": "us"}],
//!   "narrators": [{"name": "Ray Porter"}],
//!   "lengthMinutes": 970,
//!   "releaseDate": "2021-05-04T00:00:00.000+00:00",
//!   "series": []
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Book lookup response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub asin: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default)]
    pub authors: Vec<Person>,
    #[serde(default)]
    pub narrators: Vec<Person>,
    pub publisher: Option<String>,
    pub publish_date: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Runtime in minutes
    pub length_minutes: Option<i64>,
    pub language: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Audimeta returns every series the book belongs to
    #[serde(default)]
    pub series: Vec<Series>,
    pub explicit: Option<bool>,
    pub release_date: Option<String>,
    pub isbn: Option<String>,
    pub region: Option<String>,
    /// "unabridged", "abridged", ...
    pub book_format: Option<String>,
}

/// Author or narrator
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Person {
    pub asin: Option<String>,
    pub name: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Genre {
    pub asin: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub genre_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Series {
    pub asin: Option<String>,
    pub name: Option<String>,
    /// Position as text ("1", "2.5", "Book 3")
    pub position: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let json = r#"{
            "asin": "B08G9PRS1K",
            "title": "Project Hail Mary",
            "subtitle": "A Novel",
            "authors": [{"asin": "B00G0WYW92", "name": "Andy Weir", "region": "us"}],
            "narrators": [{"name": "Ray Porter"}],
            "publisher": "Audible Studios",
            "description": "Ryland Grace is the sole survivor...",
            "imageUrl": "https://m.media-amazon.com/images/I/91vS2L5YfEL.jpg",
            "lengthMinutes": 970,
            "language": "english",
            "genres": [{"asin": "18580606011", "name": "Science Fiction & Fantasy", "type": "Genres"}],
            "series": [],
            "explicit": false,
            "releaseDate": "2021-05-04T00:00:00.000+00:00",
            "region": "us",
            "bookFormat": "unabridged"
        }"#;

        let response: BookResponse = serde_json::from_str(json).expect("Should parse");

        assert_eq!(response.asin.as_deref(), Some("B08G9PRS1K"));
        assert_eq!(response.authors.len(), 1);
        assert_eq!(response.narrators[0].name.as_deref(), Some("Ray Porter"));
        assert_eq!(response.length_minutes, Some(970));
        assert_eq!(response.genres[0].genre_type.as_deref(), Some("Genres"));
        assert!(response.series.is_empty());
    }

    #[test]
    fn test_parse_sparse_response() {
        let json = r#"{"asin": "B000000001"}"#;
        let response: BookResponse = serde_json::from_str(json).expect("Should parse");
        assert!(response.title.is_none());
        assert!(response.authors.is_empty());
        assert!(response.length_minutes.is_none());
    }
}
