//! Error types for Tria Contacts.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! The search engine itself is total and has no error type.

use crate::domain::ValidationError;
use thiserror::Error;

/// Errors that can occur when reading or writing the contact and tag stores.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem access failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be encoded or decoded
    #[error("Storage JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record conflicts with an existing one
    #[error("Already exists: {0}")]
    Duplicate(String),

    /// Record failed validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors that can occur while importing contacts.
#[derive(Error, Debug)]
pub enum ImportError {
    /// CSV text without a header and at least one data row
    #[error("CSV file must have at least a header row and one data row")]
    NotEnoughRows,

    /// JSON text that is neither an array nor an export object
    #[error("Invalid JSON format")]
    InvalidFormat,

    /// JSON text that does not parse
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Every imported contact already exists
    #[error("No new contacts to import (all contacts already exist)")]
    NothingToImport,

    /// Unknown import/export format name
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Persisting the merged result failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Configuration that parses but cannot be used
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ImportError
pub type ImportResult<T> = Result<T, ImportError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::NotFound("contact 7".to_string());
        assert_eq!(err.to_string(), "Not found: contact 7");

        let err = ConfigError::InvalidValue {
            var: "SEARCH_THRESHOLD".to_string(),
            reason: "Must be between 0 and 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for SEARCH_THRESHOLD: Must be between 0 and 1"
        );

        let err = ImportError::NotEnoughRows;
        assert_eq!(
            err.to_string(),
            "CSV file must have at least a header row and one data row"
        );
    }

    #[test]
    fn test_store_error_wraps_validation() {
        let err: StoreError = ValidationError::MissingField("name").into();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_import_error_is_transparent_over_store() {
        let err: ImportError = StoreError::Duplicate("tag work".to_string()).into();
        assert_eq!(err.to_string(), "Already exists: tag work");
    }
}
