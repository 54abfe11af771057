//! Audimeta HTTP client
//!
//! Handles communication with the Audimeta book endpoint.
//! See: https://audimeta.de/api-docs
//!
//! Audimeta serves cached catalog data by default; `cache=false` forces it to
//! refresh from the upstream catalog.

use super::dto;
use crate::enrichment::domain::EnrichmentError;
use crate::enrichment::http::{self, join_url};

/// Audimeta API client
pub struct AudimetaClient {
    http_client: reqwest::Client,
}

impl AudimetaClient {
    /// Create a new client
    pub fn new() -> Result<Self, EnrichmentError> {
        Ok(Self {
            http_client: http::build_http_client()?,
        })
    }

    /// Look up a book by ASIN.
    ///
    /// Returns `Ok(None)` when Audimeta has no record for the ASIN.
    pub async fn lookup_book(
        &self,
        base_url: &str,
        asin: &str,
        region: &str,
        use_cache: bool,
    ) -> Result<Option<dto::BookResponse>, EnrichmentError> {
        let url = book_url(base_url, asin, region, use_cache);
        tracing::debug!(target: "enrichment::audimeta", %url, "Fetching book metadata");
        http::get_json(&self.http_client, &url).await
    }
}

fn book_url(base_url: &str, asin: &str, region: &str, use_cache: bool) -> String {
    join_url(
        base_url,
        &format!(
            "book/{}?cache={}&region={}",
            urlencoding::encode(asin),
            use_cache,
            urlencoding::encode(region)
        ),
    )
}
