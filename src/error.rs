//! Application-wide error types.
//!
//! This module provides a unified error hierarchy for the application.
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors ([`SearchError`], [`EnrichmentError`],
//!   [`ConfigError`]) for detailed handling
//! - All errors implement `std::error::Error` for compatibility
//!
//! # Example
//!
//! ```ignore
//! use book_scout::error::{Error, Result, ResultExt};
//!
//! fn load_results(path: &Path) -> Result<Vec<SearchResult>> {
//!     let contents = std::fs::read(path).with_context("reading results file")?;
//!     Ok(serde_json::from_slice(&contents)?)
//! }
//! ```

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::enrichment::EnrichmentError;
use crate::search::SearchError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
///
/// Aggregates errors from all subsystems for unified handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Search validation, cancellation or backend failure
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Metadata provider error
    #[error("Enrichment error: {0}")]
    Enrichment(#[from] EnrichmentError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// File not found
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Invalid command-line or file input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a not found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, serde_json::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Json(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("/books/owned.txt");
        assert!(err.to_string().contains("/books/owned.txt"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::from(SearchError::Cancelled).context("while searching for Dune");
        let msg = err.to_string();
        assert!(msg.contains("while searching for Dune"));
        assert!(msg.contains("Search cancelled"));
    }

    #[test]
    fn test_enrichment_error_converts() {
        let err: Error = EnrichmentError::RateLimited.into();
        assert!(matches!(err, Error::Enrichment(EnrichmentError::RateLimited)));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(Error::invalid_input("test"));
        let with_ctx = result.with_context("additional context");
        assert!(with_ctx.unwrap_err().to_string().contains("additional context"));

        let json: std::result::Result<u32, serde_json::Error> = serde_json::from_str("nope");
        let err = json.with_context("parsing results").unwrap_err();
        assert!(err.to_string().starts_with("parsing results"));
    }
}
