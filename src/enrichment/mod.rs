//! Audiobook metadata enrichment - fills in search results from external
//! catalog providers.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`audimeta/dto.rs`, `audnexus/dto.rs`) - Exact API response shapes
//! - **Adapters** - Convert DTOs to domain models
//! - **Clients** - HTTP clients for external APIs
//! - **Strategies** - Per-provider lookup logic behind [`traits::MetadataStrategy`]
//! - **Coordinator** - Ordered fallback across the configured sources
//!
//! This decoupling means:
//! 1. API changes don't ripple through our codebase
//! 2. We can test API contracts independently
//! 3. We can swap providers without changing business logic
//!
//! # Usage
//!
//! ```ignore
//! use enrichment::MetadataCoordinator;
//!
//! let coordinator = MetadataCoordinator::with_default_strategies("us")?;
//! if let Some(hit) = coordinator.enrich("B08G9PRS1K", &config.metadata.sources, None).await {
//!     let enriched = result.with_enrichment(&hit.metadata, &hit.source_name);
//! }
//! ```

pub mod audimeta;
pub mod audnexus;
pub mod coordinator;
pub mod domain;
pub(crate) mod http;
pub mod strategies;
pub mod traits;

pub use coordinator::{EnrichmentHit, MetadataCoordinator};
pub use domain::{BookMetadata, EnrichmentError};
