//! Raw search backend - the collaborator that actually finds candidates.
//!
//! The executor only knows the [`RawSearch`] trait. The production
//! implementation posts to a search service over HTTP; tests use
//! [`mocks::MockBackend`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::classify::SearchType;
use super::error::SearchError;
use super::validation::region_for_language;
use crate::enrichment::http;
use crate::model::SearchResult;

/// One search request handed to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Backend-ready query (`ASIN:` / `ISBN:` prefixed for identifier lookups)
    pub query: String,
    pub search_type: SearchType,
    /// Active result language ("english", "german", ...)
    pub language: String,
}

/// Something that can run a raw search.
///
/// Implementations should stop work once `cancel` fires and may return
/// [`SearchError::Cancelled`]; the executor treats any outcome after
/// cancellation as cancelled regardless.
#[async_trait]
pub trait RawSearch: Send + Sync + 'static {
    async fn search(
        &self,
        request: SearchRequest,
        cancel: CancellationToken,
    ) -> Result<Vec<SearchResult>, SearchError>;
}

/// Body of `POST <backend>/search`
#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    mode: &'static str,
    query: &'a str,
    region: &'a str,
}

/// `{ "results": [...] }` envelope around the result list.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// Decode a search response body, either a bare array or an envelope.
///
/// The shape is picked from the first non-blank byte so a bad field reports
/// its own error instead of "no variant matched".
pub fn decode_results(body: &[u8]) -> Result<Vec<SearchResult>, SearchError> {
    let invalid = |e: serde_json::Error| SearchError::Backend(format!("Invalid search response: {}", e));

    match body.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'[') => serde_json::from_slice::<Vec<SearchResult>>(body).map_err(invalid),
        _ => serde_json::from_slice::<Envelope>(body)
            .map(|envelope| envelope.results)
            .map_err(invalid),
    }
}

/// HTTP search backend.
pub struct HttpSearchBackend {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpSearchBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SearchError> {
        let http_client =
            http::build_http_client().map_err(|e| SearchError::Backend(e.to_string()))?;
        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }

    async fn post_search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError> {
        let body = SearchBody {
            mode: "Simple",
            query: &request.query,
            region: region_for_language(&request.language),
        };

        tracing::debug!(
            target: "search::backend",
            query = %request.query,
            search_type = %request.search_type,
            region = body.region,
            "Posting search request"
        );

        let response = self
            .http_client
            .post(self.search_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Backend(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SearchError::Backend(e.to_string()))?;
        decode_results(&bytes)
    }
}

#[async_trait]
impl RawSearch for HttpSearchBackend {
    async fn search(
        &self,
        request: SearchRequest,
        cancel: CancellationToken,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tokio::select! {
            _ = cancel.cancelled() => Err(SearchError::Cancelled),
            result = self.post_search(&request) => result,
        }
    }
}

/// Mock backends for testing.
#[cfg(test)]
pub mod mocks {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;

    /// Backend that answers every query with one result titled after the
    /// query, after an optional delay. It ignores cancellation on purpose so
    /// tests can check that the executor suppresses late answers.
    pub struct MockBackend {
        pub delay: Duration,
        pub error: Option<SearchError>,
        requests: Mutex<Vec<SearchRequest>>,
    }

    impl MockBackend {
        pub fn instant() -> Self {
            Self::with_delay(Duration::ZERO)
        }

        pub fn with_delay(delay: Duration) -> Self {
            Self {
                delay,
                error: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(error: SearchError) -> Self {
            Self {
                error: Some(error),
                ..Self::instant()
            }
        }

        pub fn requests(&self) -> Vec<SearchRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RawSearch for MockBackend {
        async fn search(
            &self,
            request: SearchRequest,
            _cancel: CancellationToken,
        ) -> Result<Vec<SearchResult>, SearchError> {
            self.requests.lock().unwrap().push(request.clone());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if let Some(ref err) = self.error {
                return Err(err.clone());
            }
            Ok(vec![SearchResult::new(request.query, "Mock Author")])
        }
    }
}
