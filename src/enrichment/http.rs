//! Shared HTTP plumbing for metadata provider clients.
//!
//! Every provider speaks plain JSON over GET, so status handling lives here:
//! 404 means "no data for this ASIN", 429 is a rate limit, anything else that
//! isn't a success is an API error.

use serde::de::DeserializeOwned;

use super::domain::EnrichmentError;

/// User agent sent to every metadata provider
pub const USER_AGENT: &str = concat!("BookScout/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by provider clients.
pub fn build_http_client() -> Result<reqwest::Client, EnrichmentError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| EnrichmentError::Network(format!("Failed to build HTTP client: {}", e)))
}

/// Join a configured base URL and a path without doubling slashes.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// GET `url` and decode the JSON body.
///
/// Returns `Ok(None)` when the provider has no record (HTTP 404).
pub async fn get_json<T: DeserializeOwned>(
    http_client: &reqwest::Client,
    url: &str,
) -> Result<Option<T>, EnrichmentError> {
    let response = http_client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| EnrichmentError::Network(e.to_string()))?;

    let status = response.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(EnrichmentError::RateLimited);
    }

    if !status.is_success() {
        return Err(EnrichmentError::ApiError(format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    response
        .json::<T>()
        .await
        .map(Some)
        .map_err(|e| EnrichmentError::Parse(e.to_string()))
}
