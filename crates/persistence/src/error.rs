//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence layer,
//! following a hierarchy that separates caller validation errors, query
//! construction/decoding errors and errors raised by the datastore itself.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
///
/// This enum encompasses all possible errors that can occur during persistence
/// operations, organized by category.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Caller contract violations
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Query shape and result decoding errors
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors raised when a caller hands in arguments that break the API contract.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Offset or limit was negative.
    #[error("invalid pagination: {field} must not be negative (got {value})")]
    InvalidPagination { field: &'static str, value: i64 },
}

/// Errors related to the shape of a query or the rows it produced.
#[derive(Error, Debug)]
pub enum QueryError {
    /// A single-row fetch matched more than one row.
    #[error("expected at most one result, found {count}")]
    NonUniqueResult { count: usize },

    /// A column could not be decoded into the requested type.
    #[error("type mismatch in column {column}: expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A positional column access went past the end of the row.
    #[error("column index {index} out of range for row of width {width}")]
    ColumnOutOfRange { index: usize, width: usize },

    /// A named column access found no such label.
    #[error("unknown column: {name}")]
    UnknownColumn { name: String },

    /// A select query had nothing to project.
    #[error("query has an empty projection")]
    EmptyProjection,

    /// A select statement had no root table.
    #[error("select statement has no source table")]
    MissingSource,

    /// An update statement had no assignments.
    #[error("update statement has no assignments")]
    EmptyUpdate,
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Connection pool exhausted.
    #[error("connection pool exhausted for {backend_name}")]
    PoolExhausted { backend_name: String },

    /// Schema migration error.
    #[error("schema migration failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryError { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for query decoding.
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(_err: r2d2::Error) -> Self {
        StorageError::Backend(BackendError::PoolExhausted {
            backend_name: "sqlite".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = StorageError::Validation(ValidationError::InvalidPagination {
            field: "offset",
            value: -1,
        });
        assert_eq!(
            err.to_string(),
            "invalid pagination: offset must not be negative (got -1)"
        );
    }

    #[test]
    fn test_query_error_display() {
        let err = QueryError::NonUniqueResult { count: 3 };
        assert_eq!(err.to_string(), "expected at most one result, found 3");

        let err = QueryError::TypeMismatch {
            column: "age".to_string(),
            expected: "integer",
            found: "text",
        };
        assert!(err.to_string().contains("type mismatch in column age"));
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::ConnectionFailed {
            backend_name: "sqlite".to_string(),
            message: "refused".to_string(),
        };
        assert_eq!(err.to_string(), "connection failed to sqlite: refused");
    }

    #[test]
    fn test_storage_error_from_layers() {
        let err: StorageError = QueryError::EmptyProjection.into();
        assert!(matches!(err, StorageError::Query(_)));

        let err: StorageError = BackendError::QueryError {
            message: "syntax error".to_string(),
        }
        .into();
        assert!(matches!(err, StorageError::Backend(_)));
    }
}
