//! Pagination types for query results.
//!
//! This module defines offset-based pagination bounds and the paged result
//! container returned by count-plus-content queries.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Offset/limit bounds for a query.
///
/// `limit: None` means unbounded. Both bounds are unsigned; the signed
/// constructor [`Pagination::new`] rejects negative input instead of clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    /// Number of rows to skip.
    #[serde(default)]
    pub offset: u64,

    /// Maximum number of rows to return.
    #[serde(default)]
    pub limit: Option<u64>,
}

impl Pagination {
    /// Builds pagination from caller-supplied signed values.
    ///
    /// # Errors
    ///
    /// * `ValidationError::InvalidPagination` - if `offset` or `limit` is negative
    pub fn new(offset: i64, limit: Option<i64>) -> Result<Self, ValidationError> {
        let offset = u64::try_from(offset).map_err(|_| ValidationError::InvalidPagination {
            field: "offset",
            value: offset,
        })?;
        let limit = limit
            .map(|l| {
                u64::try_from(l).map_err(|_| ValidationError::InvalidPagination {
                    field: "limit",
                    value: l,
                })
            })
            .transpose()?;
        Ok(Self { offset, limit })
    }

    /// No offset and no limit.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// A page of `limit` rows starting at `offset`.
    pub fn page(offset: u64, limit: u64) -> Self {
        Self {
            offset,
            limit: Some(limit),
        }
    }

    /// Sets the offset.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the limit.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if neither bound restricts the result.
    pub fn is_unbounded(&self) -> bool {
        self.offset == 0 && self.limit.is_none()
    }
}

/// A page of results together with the total number of matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResults<T> {
    /// The rows of this page.
    pub results: Vec<T>,

    /// Total number of matching rows, ignoring pagination.
    pub total: u64,

    /// Offset this page was fetched with.
    pub offset: u64,

    /// Limit this page was fetched with.
    pub limit: Option<u64>,
}

impl<T> QueryResults<T> {
    /// Creates a page.
    pub fn new(results: Vec<T>, total: u64, pagination: Pagination) -> Self {
        Self {
            results,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        }
    }

    /// Number of rows in this page.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if the page holds no rows.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns true if rows exist beyond this page.
    pub fn has_next(&self) -> bool {
        self.offset.saturating_add(self.results.len() as u64) < self.total
    }

    /// Maps the page content, keeping the counts.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> QueryResults<U> {
        QueryResults {
            results: self.results.into_iter().map(f).collect(),
            total: self.total,
            offset: self.offset,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_new_valid() {
        let pagination = Pagination::new(1, Some(2)).unwrap();
        assert_eq!(pagination, Pagination::page(1, 2));
    }

    #[test]
    fn test_pagination_rejects_negative_offset() {
        let err = Pagination::new(-1, Some(2)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidPagination {
                field: "offset",
                value: -1
            }
        ));
    }

    #[test]
    fn test_pagination_rejects_negative_limit() {
        let err = Pagination::new(0, Some(-5)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidPagination {
                field: "limit",
                value: -5
            }
        ));
    }

    #[test]
    fn test_pagination_unbounded() {
        assert!(Pagination::unbounded().is_unbounded());
        assert!(Pagination::new(0, None).unwrap().is_unbounded());
        assert!(!Pagination::unbounded().with_offset(3).is_unbounded());
    }

    #[test]
    fn test_query_results_has_next() {
        let page = QueryResults::new(vec![1, 2], 4, Pagination::page(1, 2));
        assert!(page.has_next());

        let last = QueryResults::new(vec![4], 4, Pagination::page(3, 2));
        assert!(!last.has_next());
    }

    #[test]
    fn test_query_results_has_next_at_max_offset() {
        let page = QueryResults::new(vec![1], 4, Pagination::unbounded().with_offset(u64::MAX));
        assert!(!page.has_next());

        let empty = QueryResults::<i32>::new(Vec::new(), u64::MAX, Pagination::page(u64::MAX, 1));
        assert!(!empty.has_next());
    }

    #[test]
    fn test_query_results_map() {
        let page = QueryResults::new(vec![1, 2], 2, Pagination::unbounded()).map(|n| n * 10);
        assert_eq!(page.results, vec![10, 20]);
        assert_eq!(page.total, 2);
    }
}
