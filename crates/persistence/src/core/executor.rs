//! Query execution trait.
//!
//! This module defines the [`QueryExecutor`] trait, the single seam between
//! query construction and a concrete database. Everything above it (query
//! factory, repository, member search) only builds [`QueryDescription`]s and
//! [`Mutation`]s and hands them over.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::query::{Mutation, QueryDescription};
use crate::types::Row;

/// Executes query descriptions against a database.
///
/// Implementations render the description in their own dialect and must not
/// alter its semantics: filters, joins, ordering (including null placement)
/// and pagination are applied exactly as described. Rows come back labelled
/// with [`QueryDescription::labels`], in projection order.
///
/// Each call is independent. Implementations may be called concurrently and
/// manage their own connections and timeouts.
///
/// # Example
///
/// ```ignore
/// use roster_persistence::core::QueryExecutor;
/// use roster_persistence::query::{QMember, QueryDescription};
///
/// async fn adults<E: QueryExecutor>(executor: &E) -> StorageResult<u64> {
///     let member = QMember::member();
///     let query = QueryDescription::select_from(&member).with_filter(member.age.goe(18));
///     executor.count(&query).await
/// }
/// ```
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Runs a select and returns its rows.
    ///
    /// # Errors
    ///
    /// * `StorageError::Query` - If the description cannot be rendered
    /// * `StorageError::Backend` - If the database rejects or fails the query
    async fn fetch(&self, query: &QueryDescription) -> StorageResult<Vec<Row>>;

    /// Counts the rows `query` would return, ignoring its ordering and
    /// pagination.
    ///
    /// # Errors
    ///
    /// Same as [`fetch`](Self::fetch).
    async fn count(&self, query: &QueryDescription) -> StorageResult<u64>;

    /// Runs a bulk update or delete and returns the number of affected rows.
    ///
    /// # Errors
    ///
    /// * `StorageError::Query(EmptyUpdate)` - If an update assigns nothing
    /// * `StorageError::Backend` - If the database rejects or fails the statement
    async fn execute(&self, mutation: &Mutation) -> StorageResult<u64>;
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for Arc<T> {
    async fn fetch(&self, query: &QueryDescription) -> StorageResult<Vec<Row>> {
        (**self).fetch(query).await
    }

    async fn count(&self, query: &QueryDescription) -> StorageResult<u64> {
        (**self).count(query).await
    }

    async fn execute(&self, mutation: &Mutation) -> StorageResult<u64> {
        (**self).execute(mutation).await
    }
}
