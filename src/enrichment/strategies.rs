//! Production metadata strategies, one per provider.
//!
//! A strategy is chosen for a configured source by looking at its base URL:
//! the Audimeta strategy serves any URL containing `audimeta.de`, the
//! Audnexus strategy any URL containing `audnex.us` (case-insensitive).

use async_trait::async_trait;

use super::audimeta::{self, AudimetaClient};
use super::audnexus::{self, AudnexusClient};
use super::domain::{BookMetadata, EnrichmentError};
use super::traits::{AudimetaApi, AudnexusApi, MetadataStrategy};
use crate::model::SourceConfiguration;

/// Host fragment identifying an Audimeta endpoint
pub const AUDIMETA_HOST: &str = "audimeta.de";
/// Host fragment identifying an Audnexus endpoint
pub const AUDNEXUS_HOST: &str = "audnex.us";

/// Origin recorded on metadata when the caller gives no hint
const DEFAULT_ORIGIN: &str = "Audible";

fn base_url_matches(source: &SourceConfiguration, host: &str) -> bool {
    source.base_url.to_ascii_lowercase().contains(host)
}

fn require_http(source: &SourceConfiguration) -> Result<(), EnrichmentError> {
    let url = source.base_url.trim().to_ascii_lowercase();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(EnrichmentError::InvalidBaseUrl {
            source_name: source.name.clone(),
            url: source.base_url.clone(),
        })
    }
}

fn origin(original_source: Option<&str>) -> &str {
    original_source
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_ORIGIN)
}

/// Audimeta lookup with a single cache-bypassing retry.
pub struct AudimetaStrategy<C = AudimetaClient> {
    client: C,
    region: String,
}

impl<C: AudimetaApi> AudimetaStrategy<C> {
    pub fn new(client: C, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }
}

#[async_trait]
impl<C: AudimetaApi> MetadataStrategy for AudimetaStrategy<C> {
    fn name(&self) -> &'static str {
        "Audimeta"
    }

    fn can_handle(&self, source: &SourceConfiguration) -> bool {
        base_url_matches(source, AUDIMETA_HOST)
    }

    async fn fetch(
        &self,
        asin: &str,
        source: &SourceConfiguration,
        original_source: Option<&str>,
    ) -> Result<Option<BookMetadata>, EnrichmentError> {
        require_http(source)?;

        let cached = self
            .client
            .lookup_book(&source.base_url, asin, &self.region, true)
            .await?;

        let response = match cached {
            Some(response) => Some(response),
            None => {
                tracing::debug!(
                    target: "enrichment::audimeta",
                    asin = %asin,
                    "No cached record, retrying with cache disabled"
                );
                // A failed retry counts as "nothing found", not as an error
                match self
                    .client
                    .lookup_book(&source.base_url, asin, &self.region, false)
                    .await
                {
                    Ok(response) => response,
                    Err(e) => {
                        tracing::debug!(
                            target: "enrichment::audimeta",
                            asin = %asin,
                            error = %e,
                            "Uncached retry failed"
                        );
                        None
                    }
                }
            }
        };

        Ok(response.map(|r| audimeta::to_metadata(r, asin, origin(original_source))))
    }
}

/// Audnexus lookup.
pub struct AudnexusStrategy<C = AudnexusClient> {
    client: C,
    region: String,
}

impl<C: AudnexusApi> AudnexusStrategy<C> {
    pub fn new(client: C, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }
}

#[async_trait]
impl<C: AudnexusApi> MetadataStrategy for AudnexusStrategy<C> {
    fn name(&self) -> &'static str {
        "Audnexus"
    }

    fn can_handle(&self, source: &SourceConfiguration) -> bool {
        base_url_matches(source, AUDNEXUS_HOST)
    }

    async fn fetch(
        &self,
        asin: &str,
        source: &SourceConfiguration,
        original_source: Option<&str>,
    ) -> Result<Option<BookMetadata>, EnrichmentError> {
        require_http(source)?;

        let response = self
            .client
            .lookup_book(&source.base_url, asin, &self.region)
            .await?;

        Ok(response.map(|r| audnexus::to_metadata(r, asin, origin(original_source))))
    }
}

/// The closed set of strategies the binary ships with.
pub enum ProviderStrategy {
    Audimeta(AudimetaStrategy),
    Audnexus(AudnexusStrategy),
}

#[async_trait]
impl MetadataStrategy for ProviderStrategy {
    fn name(&self) -> &'static str {
        match self {
            Self::Audimeta(s) => s.name(),
            Self::Audnexus(s) => s.name(),
        }
    }

    fn can_handle(&self, source: &SourceConfiguration) -> bool {
        match self {
            Self::Audimeta(s) => s.can_handle(source),
            Self::Audnexus(s) => s.can_handle(source),
        }
    }

    async fn fetch(
        &self,
        asin: &str,
        source: &SourceConfiguration,
        original_source: Option<&str>,
    ) -> Result<Option<BookMetadata>, EnrichmentError> {
        match self {
            Self::Audimeta(s) => s.fetch(asin, source, original_source).await,
            Self::Audnexus(s) => s.fetch(asin, source, original_source).await,
        }
    }
}

/// Build the default strategy list (Audimeta, then Audnexus) for `region`.
pub fn default_strategies(region: &str) -> Result<Vec<ProviderStrategy>, EnrichmentError> {
    Ok(vec![
        ProviderStrategy::Audimeta(AudimetaStrategy::new(AudimetaClient::new()?, region)),
        ProviderStrategy::Audnexus(AudnexusStrategy::new(AudnexusClient::new()?, region)),
    ])
}
