//! Audiobook search - classification, validation, debounced execution and
//! result filtering.
//!
//! # Architecture
//!
//! - **classify** - raw query to [`SearchType`]
//! - **validation** - synchronous checks run before any request
//! - **backend** - the [`RawSearch`] collaborator and its HTTP implementation
//! - **executor** - debounced, cancellable search sessions
//! - **filters** - ordered predicate pipeline applied by the caller
//!
//! Filtering is deliberately not part of the executor: callers decide when
//! (and whether) to run the pipeline over a completed search.

pub mod backend;
pub mod classify;
pub mod error;
pub mod executor;
pub mod filters;
pub mod validation;

pub use backend::{HttpSearchBackend, RawSearch, SearchRequest};
pub use classify::{SearchType, classify};
pub use error::SearchError;
pub use executor::{SearchExecutor, SearchOutcome, SearchState};
pub use filters::{FilterOutcome, FilterPipeline};
