//! Audnexus API Data Transfer Objects
//!
//! These types match what the Audnexus `/books/{asin}` endpoint returns.
//! DO NOT use these types outside the audnexus module - convert to domain types.
//!
//! API Reference: https://audnex.us/

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
    pub publisher_name: Option<String>,
    pub release_date: Option<String>,
    /// HTML description
    pub description: Option<String>,
    /// Short plain-text summary
    pub summary: Option<String>,
    /// Cover image URL
    pub image: Option<String>,
    pub runtime_length_min: Option<i64>,
    pub language: Option<String>,
    /// "unabridged" / "abridged"
    pub format_type: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Audnexus returns single objects here, not arrays
    pub series_primary: Option<Series>,
    pub series_secondary: Option<Series>,
    pub rating: Option<String>,
    /// Copyright year
    pub copyright: Option<i32>,
    pub isbn: Option<String>,
    pub region: Option<String>,
    pub is_adult: Option<bool>,
    pub literature_type: Option<String>,
}

/// Author or narrator
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Person {
    pub asin: Option<String>,
    pub name: Option<String>,
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
    pub position: Option<String>,
}
