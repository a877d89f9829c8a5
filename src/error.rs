//! Error types for scrollfeed
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while fetching and accumulating pages
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport-level failure talking to the record source
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Record source answered with a non-success status
    #[error("Source returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Page index outside 1..=max_pages
    #[error("Invalid page {page} (expected 1..={max})")]
    InvalidPage { page: u32, max: u32 },

    /// Record source failure that is not HTTP related (mock sources, closed channels)
    #[error("Source error: {0}")]
    Source(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for scrollfeed operations
pub type Result<T> = std::result::Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error() {
        let err = FeedError::Status {
            status: 503,
            body: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "Source returned 503: maintenance");
    }

    #[test]
    fn test_invalid_page_error() {
        let err = FeedError::InvalidPage { page: 11, max: 10 };
        assert_eq!(err.to_string(), "Invalid page 11 (expected 1..=10)");
    }

    #[test]
    fn test_source_error() {
        let err = FeedError::Source("page 3 unavailable".to_string());
        assert_eq!(err.to_string(), "Source error: page 3 unavailable");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FeedError = io_err.into();
        assert!(matches!(err, FeedError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: FeedError = json_err.into();
        assert!(matches!(err, FeedError::Json(_)));
    }
}
