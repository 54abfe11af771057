//! Metadata enrichment coordinator - ordered fallback across providers.
//!
//! For a given ASIN the coordinator walks the configured sources in priority
//! order:
//! 1. Skip disabled sources
//! 2. Pick the first strategy that can handle the source's base URL
//! 3. Fetch; the first source that returns metadata wins
//!
//! Provider failures are never fatal. Running out of sources is not an error
//! either, it just means there is nothing to enrich with.

use super::domain::BookMetadata;
use super::strategies::{self, ProviderStrategy};
use super::traits::MetadataStrategy;
use super::EnrichmentError;
use crate::model::SourceConfiguration;

/// Metadata returned by the first source that had something.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentHit {
    pub metadata: BookMetadata,
    /// Display name of the winning source
    pub source_name: String,
}

/// Ordered-fallback enrichment over a fixed set of strategies.
pub struct MetadataCoordinator<S = ProviderStrategy> {
    strategies: Vec<S>,
}

impl MetadataCoordinator<ProviderStrategy> {
    /// Coordinator with the built-in Audimeta and Audnexus strategies.
    pub fn with_default_strategies(region: &str) -> Result<Self, EnrichmentError> {
        Ok(Self::new(strategies::default_strategies(region)?))
    }
}

impl<S: MetadataStrategy> MetadataCoordinator<S> {
    pub fn new(strategies: Vec<S>) -> Self {
        Self { strategies }
    }

    /// Registered strategies, in selection order.
    pub fn strategies(&self) -> &[S] {
        &self.strategies
    }

    fn strategy_for(&self, source: &SourceConfiguration) -> Option<&S> {
        self.strategies.iter().find(|s| s.can_handle(source))
    }

    /// Try each enabled source in order until one returns metadata.
    pub async fn enrich(
        &self,
        asin: &str,
        sources: &[SourceConfiguration],
        original_source: Option<&str>,
    ) -> Option<EnrichmentHit> {
        for source in sources.iter().filter(|s| s.enabled) {
            let Some(strategy) = self.strategy_for(source) else {
                tracing::warn!(
                    target: "enrichment",
                    source = %source.name,
                    base_url = %source.base_url,
                    "No metadata strategy can handle source, skipping"
                );
                continue;
            };

            tracing::debug!(
                target: "enrichment",
                asin = %asin,
                source = %source.name,
                strategy = strategy.name(),
                "Trying metadata source"
            );

            match strategy.fetch(asin, source, original_source).await {
                Ok(Some(metadata)) => {
                    tracing::info!(
                        target: "enrichment",
                        asin = %asin,
                        source = %source.name,
                        "Enriched from metadata source"
                    );
                    return Some(EnrichmentHit {
                        metadata,
                        source_name: source.name.clone(),
                    });
                }
                Ok(None) => {
                    tracing::debug!(
                        target: "enrichment",
                        asin = %asin,
                        source = %source.name,
                        "No metadata found, trying next source"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        target: "enrichment",
                        asin = %asin,
                        source = %source.name,
                        error = %e,
                        "Metadata source failed, trying next source"
                    );
                }
            }
        }

        tracing::debug!(target: "enrichment", asin = %asin, "All metadata sources exhausted");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::traits::mocks::MockStrategy;

    fn sources() -> Vec<SourceConfiguration> {
        vec![
            SourceConfiguration::new("First", "https://one.example"),
            SourceConfiguration::new("Second", "https://two.example"),
            SourceConfiguration::new("Third", "https://three.example"),
        ]
    }

    #[tokio::test]
    async fn test_falls_back_past_error_and_empty() {
        let coordinator = MetadataCoordinator::new(vec![
            MockStrategy::failing("one.example", EnrichmentError::Network("timeout".into())),
            MockStrategy::empty("two.example"),
            MockStrategy::found("three.example", "Project Hail Mary"),
        ]);

        let hit = coordinator.enrich("B08G9PRS1K", &sources(), None).await.unwrap();

        assert_eq!(hit.source_name, "Third");
        assert_eq!(hit.metadata.title.as_deref(), Some("Project Hail Mary"));
        for strategy in coordinator.strategies() {
            assert_eq!(strategy.call_count(), 1);
        }
    }

    #[tokio::test]
    async fn test_first_hit_stops_iteration() {
        let coordinator = MetadataCoordinator::new(vec![
            MockStrategy::found("one.example", "Dune"),
            MockStrategy::found("two.example", "Dune Messiah"),
        ]);

        let hit = coordinator.enrich("B002V1OF70", &sources(), None).await.unwrap();

        assert_eq!(hit.source_name, "First");
        assert_eq!(coordinator.strategies()[1].call_count(), 0);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_none() {
        let coordinator = MetadataCoordinator::new(vec![
            MockStrategy::empty("one.example"),
            MockStrategy::failing("two.example", EnrichmentError::RateLimited),
        ]);
        assert!(coordinator.enrich("B002V1OF70", &sources(), None).await.is_none());
        assert!(coordinator.enrich("B002V1OF70", &[], None).await.is_none());
    }

    #[tokio::test]
    async fn test_unhandled_and_disabled_sources_are_skipped() {
        let coordinator = MetadataCoordinator::new(vec![MockStrategy::found("three.example", "Dune")]);
        let mut sources = sources();
        sources.push(SourceConfiguration {
            enabled: false,
            ..SourceConfiguration::new("Disabled", "https://three.example/mirror")
        });
        sources.swap(0, 3);

        let hit = coordinator.enrich("B002V1OF70", &sources, None).await.unwrap();

        assert_eq!(hit.source_name, "Third");
        assert_eq!(coordinator.strategies()[0].call_count(), 1);
    }

    #[tokio::test]
    async fn test_first_capable_strategy_is_used() {
        let coordinator = MetadataCoordinator::new(vec![
            MockStrategy::empty("example"),
            MockStrategy::found("one.example", "Dune"),
        ]);
        let only_first = &sources()[..1];
        assert!(coordinator.enrich("B002V1OF70", only_first, None).await.is_none());
        assert_eq!(coordinator.strategies()[1].call_count(), 0);
    }
}
