//! QueryExecutor implementation for SQLite.

use async_trait::async_trait;
use rusqlite::types::ValueRef;
use tracing::{debug, error, trace};

use crate::core::QueryExecutor;
use crate::error::{QueryError, QueryResult, StorageResult};
use crate::query::{Mutation, QueryDescription};
use crate::types::{Row, Value};

use super::SqliteBackend;
use super::backend::internal_error;
use super::query_builder::{QueryBuilder, SqlFragment};

fn value_from_ref(column: &str, value: ValueRef<'_>) -> QueryResult<Value> {
    match value {
        ValueRef::Null => Ok(Value::Null),
        ValueRef::Integer(i) => Ok(Value::Integer(i)),
        ValueRef::Real(f) => Ok(Value::Real(f)),
        ValueRef::Text(bytes) => Ok(Value::Text(String::from_utf8_lossy(bytes).into_owned())),
        ValueRef::Blob(_) => Err(QueryError::TypeMismatch {
            column: column.to_string(),
            expected: "text",
            found: "blob",
        }),
    }
}

impl SqliteBackend {
    fn query_rows(&self, fragment: &SqlFragment, labels: &[String]) -> StorageResult<Vec<Row>> {
        debug!(sql = %fragment.sql, params = fragment.params.len(), "Executing SQLite query");

        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(&fragment.sql).map_err(|e| {
            error!(sql = %fragment.sql, error = %e, "Failed to prepare query");
            internal_error(format!("Failed to prepare query: {}", e))
        })?;

        let width = stmt.column_count();
        let mut rows = stmt
            .query(fragment.param_refs().as_slice())
            .map_err(|e| {
                error!(sql = %fragment.sql, error = %e, "Failed to execute query");
                internal_error(format!("Failed to execute query: {}", e))
            })?;

        let mut result = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| internal_error(format!("Failed to read row: {}", e)))?
        {
            let mut values = Vec::with_capacity(width);
            for index in 0..width {
                let value = row
                    .get_ref(index)
                    .map_err(|e| internal_error(format!("Failed to read column {}: {}", index, e)))?;
                let label = labels.get(index).map(String::as_str).unwrap_or_default();
                values.push(value_from_ref(label, value)?);
            }
            result.push(Row::new(labels.to_vec(), values));
        }

        trace!(rows = result.len(), "SQLite query returned");
        Ok(result)
    }
}

#[async_trait]
impl QueryExecutor for SqliteBackend {
    async fn fetch(&self, query: &QueryDescription) -> StorageResult<Vec<Row>> {
        let fragment = QueryBuilder::select(query)?;
        self.query_rows(&fragment, &query.labels())
    }

    async fn count(&self, query: &QueryDescription) -> StorageResult<u64> {
        let fragment = QueryBuilder::count(query)?;
        debug!(sql = %fragment.sql, params = fragment.params.len(), "Executing SQLite count");

        let conn = self.get_connection()?;
        let count: i64 = conn
            .query_row(&fragment.sql, fragment.param_refs().as_slice(), |row| {
                row.get(0)
            })
            .map_err(|e| {
                error!(sql = %fragment.sql, error = %e, "Failed to count");
                internal_error(format!("Failed to count: {}", e))
            })?;

        trace!(count, "SQLite count returned");
        Ok(count as u64)
    }

    async fn execute(&self, mutation: &Mutation) -> StorageResult<u64> {
        let fragment = QueryBuilder::mutation(mutation)?;
        debug!(sql = %fragment.sql, params = fragment.params.len(), "Executing SQLite statement");

        let conn = self.get_connection()?;
        let affected = conn
            .execute(&fragment.sql, fragment.param_refs().as_slice())
            .map_err(|e| {
                error!(sql = %fragment.sql, error = %e, "Failed to execute statement");
                internal_error(format!("Failed to execute statement: {}", e))
            })?;

        trace!(affected, table = mutation.table().name, "SQLite statement applied");
        Ok(affected as u64)
    }
}
