//! Bulk `UPDATE` and `DELETE` statements.
//!
//! Bulk statements go straight to storage and report the number of affected
//! rows. Entities fetched earlier are not refreshed.

use crate::error::{QueryError, QueryResult};

use super::expr::{Column, ColumnRef, Expr};
use super::predicate::{Filter, Predicate};
use super::schema::{EntityPath, TableRef};

/// `UPDATE table SET column = expr, ... [WHERE ...]`
///
/// ```
/// use roster_persistence::query::{QMember, UpdateQuery};
///
/// let member = QMember::member();
/// let update = UpdateQuery::new(&member)
///     .set(&member.username, "unregistered")
///     .with_filter(member.age.lt(28));
///
/// assert_eq!(update.assignments().len(), 1);
/// assert!(update.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateQuery {
    table: TableRef,
    assignments: Vec<(ColumnRef, Expr)>,
    filter: Filter,
}

impl UpdateQuery {
    /// Starts an update of `entity`'s table.
    pub fn new<P: EntityPath>(entity: &P) -> Self {
        Self {
            table: entity.table().clone(),
            assignments: Vec::new(),
            filter: Filter::MatchAll,
        }
    }

    /// Assigns `value` to `column`. The value may reference other columns of
    /// the same row, e.g. `member.age.add(1)`.
    pub fn set(mut self, column: &Column, value: impl Into<Expr>) -> Self {
        self.assignments
            .push((column.reference().clone(), value.into()));
        self
    }

    /// Replaces the filter.
    pub fn with_filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Adds a conjunct to the filter.
    pub fn and_where(mut self, predicate: Predicate) -> Self {
        self.filter = std::mem::take(&mut self.filter).and(predicate);
        self
    }

    /// Target table.
    pub fn table(&self) -> &TableRef {
        &self.table
    }

    /// Column assignments in declaration order.
    pub fn assignments(&self) -> &[(ColumnRef, Expr)] {
        &self.assignments
    }

    /// Row filter.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Checks the statement can be rendered.
    ///
    /// # Errors
    ///
    /// * `QueryError::EmptyUpdate` - if nothing is assigned
    pub fn validate(&self) -> QueryResult<()> {
        if self.assignments.is_empty() {
            return Err(QueryError::EmptyUpdate);
        }
        Ok(())
    }
}

/// `DELETE FROM table [WHERE ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteQuery {
    table: TableRef,
    filter: Filter,
}

impl DeleteQuery {
    /// Starts a delete from `entity`'s table. Without a filter every row goes.
    pub fn new<P: EntityPath>(entity: &P) -> Self {
        Self {
            table: entity.table().clone(),
            filter: Filter::MatchAll,
        }
    }

    /// Replaces the filter.
    pub fn with_filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Target table.
    pub fn table(&self) -> &TableRef {
        &self.table
    }

    /// Row filter.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }
}

/// A bulk statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Bulk update.
    Update(UpdateQuery),
    /// Bulk delete.
    Delete(DeleteQuery),
}

impl Mutation {
    /// Checks the statement can be rendered.
    pub fn validate(&self) -> QueryResult<()> {
        match self {
            Mutation::Update(update) => update.validate(),
            Mutation::Delete(_) => Ok(()),
        }
    }

    /// Target table.
    pub fn table(&self) -> &TableRef {
        match self {
            Mutation::Update(update) => update.table(),
            Mutation::Delete(delete) => delete.table(),
        }
    }
}

impl From<UpdateQuery> for Mutation {
    fn from(update: UpdateQuery) -> Self {
        Mutation::Update(update)
    }
}

impl From<DeleteQuery> for Mutation {
    fn from(delete: DeleteQuery) -> Self {
        Mutation::Delete(delete)
    }
}
