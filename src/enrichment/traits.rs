//! Trait definitions for metadata providers.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.
//!
//! There are two layers:
//! - **Client traits** ([`AudimetaApi`], [`AudnexusApi`]) wrap a single HTTP
//!   endpoint and return provider DTOs.
//! - **[`MetadataStrategy`]** is what the coordinator talks to: it decides
//!   whether it can serve a configured source and returns domain metadata.
//!
//! # Example
//!
//! ```ignore
//! use book_scout::enrichment::traits::MetadataStrategy;
//!
//! async fn first_hit<S: MetadataStrategy>(strategy: &S, source: &SourceConfiguration) {
//!     if strategy.can_handle(source) {
//!         let metadata = strategy.fetch("B08G9PRS1K", source, None).await?;
//!     }
//! }
//! ```

use async_trait::async_trait;

use super::audimeta;
use super::audnexus;
use super::domain::{BookMetadata, EnrichmentError};
use crate::model::SourceConfiguration;

/// A provider-specific way of turning an ASIN into [`BookMetadata`].
#[async_trait]
pub trait MetadataStrategy: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this strategy knows how to talk to `source`.
    fn can_handle(&self, source: &SourceConfiguration) -> bool;

    /// Fetch metadata for `asin` from `source`.
    ///
    /// `Ok(None)` means the provider answered but has nothing for the ASIN.
    async fn fetch(
        &self,
        asin: &str,
        source: &SourceConfiguration,
        original_source: Option<&str>,
    ) -> Result<Option<BookMetadata>, EnrichmentError>;
}

/// Trait for the Audimeta book endpoint.
#[async_trait]
pub trait AudimetaApi: Send + Sync {
    async fn lookup_book(
        &self,
        base_url: &str,
        asin: &str,
        region: &str,
        use_cache: bool,
    ) -> Result<Option<audimeta::dto::BookResponse>, EnrichmentError>;
}

/// Trait for the Audnexus book endpoint.
#[async_trait]
pub trait AudnexusApi: Send + Sync {
    async fn lookup_book(
        &self,
        base_url: &str,
        asin: &str,
        region: &str,
    ) -> Result<Option<audnexus::dto::BookResponse>, EnrichmentError>;
}

// Implement traits for real clients

#[async_trait]
impl AudimetaApi for audimeta::AudimetaClient {
    async fn lookup_book(
        &self,
        base_url: &str,
        asin: &str,
        region: &str,
        use_cache: bool,
    ) -> Result<Option<audimeta::dto::BookResponse>, EnrichmentError> {
        self.lookup_book(base_url, asin, region, use_cache).await
    }
}

#[async_trait]
impl AudnexusApi for audnexus::AudnexusClient {
    async fn lookup_book(
        &self,
        base_url: &str,
        asin: &str,
        region: &str,
    ) -> Result<Option<audnexus::dto::BookResponse>, EnrichmentError> {
        self.lookup_book(base_url, asin, region).await
    }
}
