//! Search error types.

/// Errors that end a single search attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Missing search query")]
    MissingQuery,

    #[error("Invalid ASIN format: {0}")]
    InvalidAsin(String),

    #[error("Search cancelled")]
    Cancelled,

    #[error("Search backend failed: {0}")]
    Backend(String),
}

impl SearchError {
    /// Short message suitable for showing to the person searching.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::MissingQuery => "Please enter a search term".to_string(),
            SearchError::InvalidAsin(_) => {
                "Invalid ASIN format. Expected an Amazon ASIN like B08G9PRS1K".to_string()
            }
            SearchError::Cancelled => "Search cancelled".to_string(),
            SearchError::Backend(_) => {
                "Search failed. Check that the search backend is reachable and try again."
                    .to_string()
            }
        }
    }

    /// Validation errors are raised before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, SearchError::MissingQuery | SearchError::InvalidAsin(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(SearchError::MissingQuery.user_message(), "Please enter a search term");
        assert_eq!(SearchError::Cancelled.user_message(), "Search cancelled");
        assert!(SearchError::InvalidAsin("X".into()).user_message().contains("B08G9PRS1K"));
        assert!(!SearchError::Backend("HTTP 500".into()).is_validation());
        assert!(SearchError::InvalidAsin("X".into()).is_validation());
    }
}
