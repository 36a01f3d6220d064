//! Error types for the study catalog server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when fetching catalog data from the backend.
#[derive(Error, Debug)]
pub enum CatalogApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Search index could not be built over the fetched rows
    #[error("Search index error: {0}")]
    Search(#[from] SearchError),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Contract violations detected while constructing a search index.
///
/// These are programmer errors and are reported once, at construction.
/// A record that merely lacks a value for a configured field is not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// No searchable fields were configured
    #[error("Search index requires at least one field")]
    EmptyFieldSet,

    /// A configured field is not part of the record schema
    #[error("Unknown field '{field}' for {record_kind} records")]
    UnknownField {
        field: String,
        record_kind: &'static str,
    },

    /// The same field was configured more than once
    #[error("Field '{0}' configured more than once")]
    DuplicateField(String),
}

/// Convenience type alias for Results with CatalogApiError
pub type CatalogApiResult<T> = Result<T, CatalogApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with SearchError
pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogApiError::NotFound("note".to_string());
        assert_eq!(err.to_string(), "Resource not found: note");

        let err = ConfigError::MissingVar("CATALOG_API_KEY".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: CATALOG_API_KEY"
        );

        let err = SearchError::EmptyFieldSet;
        assert_eq!(err.to_string(), "Search index requires at least one field");
    }

    #[test]
    fn test_unknown_field_display() {
        let err = SearchError::UnknownField {
            field: "title".to_string(),
            record_kind: "note",
        };
        assert_eq!(err.to_string(), "Unknown field 'title' for note records");
    }

    #[test]
    fn test_search_error_converts_to_api_error() {
        let err: CatalogApiError = SearchError::DuplicateField("name".to_string()).into();
        assert!(matches!(err, CatalogApiError::Search(_)));
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_api_error_variants() {
        let err = CatalogApiError::ApiError {
            status: 404,
            message: "Not found".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not found"));
    }
}
