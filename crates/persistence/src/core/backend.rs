//! Backend abstraction for database drivers.
//!
//! This module defines the [`Backend`] trait, which describes a database
//! driver independently of the queries run against it. Query execution lives
//! in [`QueryExecutor`](super::QueryExecutor); a backend reports what it can
//! execute through [`BackendCapability`].

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::BackendError;

/// Identifies the type of database backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// SQLite database (file-based or in-memory).
    Sqlite,
    /// Custom or unknown backend.
    Custom(&'static str),
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Sqlite => write!(f, "sqlite"),
            BackendKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// Query features a backend may support.
///
/// Used for runtime capability discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendCapability {
    /// Basic create and read of entities.
    Crud,
    /// Inner joins.
    InnerJoin,
    /// Left outer joins.
    LeftJoin,
    /// Multiple root tables filtered in `WHERE`.
    ThetaJoin,
    /// Subqueries in `SELECT` and `WHERE`.
    Subquery,
    /// Aggregates with `GROUP BY` and `HAVING`.
    Aggregation,
    /// Sorting results.
    Sorting,
    /// Explicit `NULLS FIRST` / `NULLS LAST`.
    NullsOrdering,
    /// Offset-based pagination.
    OffsetPagination,
    /// Bulk `UPDATE`.
    BulkUpdate,
    /// Bulk `DELETE`.
    BulkDelete,
}

impl std::fmt::Display for BackendCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BackendCapability::Crud => "crud",
            BackendCapability::InnerJoin => "inner-join",
            BackendCapability::LeftJoin => "left-join",
            BackendCapability::ThetaJoin => "theta-join",
            BackendCapability::Subquery => "subquery",
            BackendCapability::Aggregation => "aggregation",
            BackendCapability::Sorting => "sorting",
            BackendCapability::NullsOrdering => "nulls-ordering",
            BackendCapability::OffsetPagination => "offset-pagination",
            BackendCapability::BulkUpdate => "bulk-update",
            BackendCapability::BulkDelete => "bulk-delete",
        };
        write!(f, "{}", name)
    }
}

/// A database backend.
///
/// # Example
///
/// ```ignore
/// use roster_persistence::core::{Backend, BackendCapability};
///
/// if backend.supports(BackendCapability::NullsOrdering) {
///     // order with nulls last
/// } else {
///     // sort in memory
/// }
/// ```
#[async_trait]
pub trait Backend: Send + Sync + Debug {
    /// Returns the kind of backend.
    fn kind(&self) -> BackendKind;

    /// Returns a human-readable name for this backend.
    fn name(&self) -> &'static str;

    /// Checks if this backend supports the given capability.
    fn supports(&self, capability: BackendCapability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Returns all capabilities supported by this backend.
    fn capabilities(&self) -> Vec<BackendCapability>;

    /// Checks if the backend is healthy and accepting connections.
    async fn health_check(&self) -> Result<(), BackendError>;

    /// Initializes the database schema if needed.
    async fn initialize(&self) -> Result<(), BackendError>;
}

/// Extension trait for backends that expose connection pool statistics.
pub trait BackendPoolStats {
    /// Returns the current number of connections handed out.
    fn active_connections(&self) -> u32;

    /// Returns the current number of idle connections.
    fn idle_connections(&self) -> u32;

    /// Returns the maximum pool size.
    fn max_connections(&self) -> u32;
}
