//! Typed fetch terminals over a [`QueryExecutor`].

use tracing::debug;

use crate::error::{QueryError, StorageResult};
use crate::query::{DeleteQuery, Mutation, QueryDescription, UpdateQuery};
use crate::types::{FromRow, FromValue, QueryResults, Row};

use super::QueryExecutor;

/// Runs query descriptions and decodes their rows.
///
/// ```ignore
/// let factory = QueryFactory::new(&backend);
/// let member = QMember::member();
///
/// let oldest: Member = factory
///     .fetch_first(QueryDescription::select_from(&member).order_by(member.age.desc()))
///     .await?
///     .expect("at least one member");
/// ```
pub struct QueryFactory<'a, E: ?Sized> {
    executor: &'a E,
}

impl<E: ?Sized> Clone for QueryFactory<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: ?Sized> Copy for QueryFactory<'_, E> {}

impl<'a, E> QueryFactory<'a, E>
where
    E: QueryExecutor + ?Sized,
{
    /// Wraps `executor`.
    pub fn new(executor: &'a E) -> Self {
        Self { executor }
    }

    /// The wrapped executor.
    pub fn executor(&self) -> &'a E {
        self.executor
    }

    /// Raw rows.
    pub async fn fetch_rows(&self, query: &QueryDescription) -> StorageResult<Vec<Row>> {
        self.executor.fetch(query).await
    }

    /// All rows, decoded.
    pub async fn fetch<T: FromRow>(&self, query: &QueryDescription) -> StorageResult<Vec<T>> {
        let rows = self.executor.fetch(query).await?;
        decode(&rows)
    }

    /// The first column of every row.
    pub async fn fetch_scalars<T: FromValue>(
        &self,
        query: &QueryDescription,
    ) -> StorageResult<Vec<T>> {
        let rows = self.executor.fetch(query).await?;
        let mut values = Vec::with_capacity(rows.len());
        for row in &rows {
            values.push(row.get(0)?);
        }
        Ok(values)
    }

    /// At most one row.
    ///
    /// # Errors
    ///
    /// * `QueryError::NonUniqueResult` - If more than one row matches
    pub async fn fetch_one<T: FromRow>(&self, query: &QueryDescription) -> StorageResult<Option<T>> {
        let rows = self.executor.fetch(query).await?;
        match rows.as_slice() {
            [] => Ok(None),
            [row] => Ok(Some(T::from_row(row)?)),
            _ => Err(QueryError::NonUniqueResult { count: rows.len() }.into()),
        }
    }

    /// The first row of `query` limited to one.
    pub async fn fetch_first<T: FromRow>(
        &self,
        query: QueryDescription,
    ) -> StorageResult<Option<T>> {
        let query = query.limit(1);
        let rows = self.executor.fetch(&query).await?;
        rows.first().map(T::from_row).transpose().map_err(Into::into)
    }

    /// Number of rows `query` matches, ignoring its ordering and pagination.
    pub async fn fetch_count(&self, query: &QueryDescription) -> StorageResult<u64> {
        self.executor.count(&query.without_paging()).await
    }

    /// One page of `query` plus the total number of matches. Runs a content
    /// query and a separate count query.
    pub async fn fetch_results<T: FromRow>(
        &self,
        query: &QueryDescription,
    ) -> StorageResult<QueryResults<T>> {
        let results = self.fetch(query).await?;
        let total = self.fetch_count(query).await?;
        debug!(
            rows = results.len(),
            total, "Fetched page of query results"
        );
        Ok(QueryResults::new(results, total, query.pagination()))
    }

    /// Runs a bulk update and returns the number of affected rows.
    pub async fn update(&self, update: UpdateQuery) -> StorageResult<u64> {
        self.executor.execute(&Mutation::Update(update)).await
    }

    /// Runs a bulk delete and returns the number of affected rows.
    pub async fn delete(&self, delete: DeleteQuery) -> StorageResult<u64> {
        self.executor.execute(&Mutation::Delete(delete)).await
    }
}

/// Decodes every row.
pub(crate) fn decode<T: FromRow>(rows: &[Row]) -> StorageResult<Vec<T>> {
    let mut decoded = Vec::with_capacity(rows.len());
    for row in rows {
        decoded.push(T::from_row(row)?);
    }
    Ok(decoded)
}
