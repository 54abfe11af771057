//! Audnexus HTTP client
//!
//! See: https://audnex.us/

use super::dto;
use crate::enrichment::domain::EnrichmentError;
use crate::enrichment::http::{self, join_url};

/// Audnexus API client
pub struct AudnexusClient {
    http_client: reqwest::Client,
}

impl AudnexusClient {
    /// Create a new client
    pub fn new() -> Result<Self, EnrichmentError> {
        Ok(Self {
            http_client: http::build_http_client()?,
        })
    }

    /// Look up a book by ASIN, seeding author records but never forcing an
    /// upstream refresh.
    pub async fn lookup_book(
        &self,
        base_url: &str,
        asin: &str,
        region: &str,
    ) -> Result<Option<dto::BookResponse>, EnrichmentError> {
        let url = book_url(base_url, asin, region);
        tracing::debug!(target: "enrichment::audnexus", %url, "Fetching book metadata");
        http::get_json(&self.http_client, &url).await
    }
}

fn book_url(base_url: &str, asin: &str, region: &str) -> String {
    join_url(
        base_url,
        &format!(
            "books/{}?region={}&seedAuthors=1&update=0",
            urlencoding::encode(asin),
            urlencoding::encode(region)
        ),
    )
}
