//! Select query descriptions.
//!
//! A [`QueryDescription`] is a backend-neutral description of a `SELECT`:
//! projection, source table, joins, filter, grouping, ordering and
//! pagination. Descriptions are plain values; an executor renders them into
//! its own dialect. Builders consume and return `self`, so a description is
//! never shared mutably.

use crate::error::{QueryError, QueryResult};
use crate::types::Pagination;

use super::expr::Expr;
use super::predicate::{Filter, Predicate};
use super::schema::{EntityPath, TableRef};

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `INNER JOIN`
    Inner,
    /// `LEFT OUTER JOIN`
    Left,
}

/// A join onto another table.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// Join type.
    pub kind: JoinKind,
    /// The joined table.
    pub table: TableRef,
    /// `ON` condition.
    pub on: Predicate,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// Placement of nulls in a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullOrdering {
    /// Whatever the backend does.
    #[default]
    Default,
    /// Nulls sort before every value.
    First,
    /// Nulls sort after every value.
    Last,
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSpecifier {
    /// Sort key.
    pub expr: Expr,
    /// Direction.
    pub direction: Direction,
    /// Null placement.
    pub nulls: NullOrdering,
}

impl OrderSpecifier {
    /// Sort on `expr` in `direction`.
    pub fn new(expr: Expr, direction: Direction) -> Self {
        Self {
            expr,
            direction,
            nulls: NullOrdering::Default,
        }
    }

    /// Nulls first.
    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullOrdering::First;
        self
    }

    /// Nulls last.
    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullOrdering::Last;
        self
    }
}

/// A backend-neutral `SELECT`.
///
/// ```
/// use roster_persistence::query::{QMember, QTeam, QueryDescription};
///
/// let member = QMember::member();
/// let team = QTeam::team();
///
/// let query = QueryDescription::select([member.username.expr().clone(), team.name.expr().clone()])
///     .from(&member)
///     .left_join(&team, member.team_fk(&team))
///     .where_all([Some(member.age.goe(20))])
///     .order_by(member.age.desc())
///     .limit(2);
///
/// assert_eq!(query.labels(), vec!["username", "name"]);
/// assert_eq!(query.pagination().limit, Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryDescription {
    projection: Vec<Expr>,
    distinct: bool,
    from: Vec<TableRef>,
    joins: Vec<Join>,
    filter: Filter,
    group_by: Vec<Expr>,
    having: Option<Predicate>,
    order_by: Vec<OrderSpecifier>,
    pagination: Pagination,
}

impl QueryDescription {
    /// Starts a query projecting `items`.
    pub fn select<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Expr>,
    {
        Self {
            projection: items.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Starts a query projecting every column of `entity`, from `entity`.
    pub fn select_from<P: EntityPath>(entity: &P) -> Self {
        Self::select(entity.columns()).from(entity)
    }

    /// Appends the columns of `entity` to the projection.
    pub fn add_entity<P: EntityPath>(mut self, entity: &P) -> Self {
        self.projection.extend(entity.columns());
        self
    }

    /// Appends one item to the projection.
    pub fn add_item(mut self, item: impl Into<Expr>) -> Self {
        self.projection.push(item.into());
        self
    }

    /// Adds a root table. Several roots form a theta join: their cross
    /// product, restricted by the filter.
    pub fn from<P: EntityPath>(mut self, entity: &P) -> Self {
        self.from.push(entity.table().clone());
        self
    }

    /// Adds an inner join.
    pub fn inner_join<P: EntityPath>(self, entity: &P, on: Predicate) -> Self {
        self.join(JoinKind::Inner, entity, on)
    }

    /// Adds a left outer join.
    pub fn left_join<P: EntityPath>(self, entity: &P, on: Predicate) -> Self {
        self.join(JoinKind::Left, entity, on)
    }

    fn join<P: EntityPath>(mut self, kind: JoinKind, entity: &P, on: Predicate) -> Self {
        self.joins.push(Join {
            kind,
            table: entity.table().clone(),
            on,
        });
        self
    }

    /// Replaces the filter.
    pub fn with_filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Adds each present predicate as a conjunct; absent ones are skipped.
    pub fn where_all<I>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = Option<Predicate>>,
    {
        let filter = std::mem::take(&mut self.filter);
        self.filter = parts.into_iter().fold(filter, Filter::and_maybe);
        self
    }

    /// Sets the `GROUP BY` keys.
    pub fn group_by<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = Expr>,
    {
        self.group_by = keys.into_iter().collect();
        self
    }

    /// Sets the `HAVING` condition.
    pub fn having(mut self, predicate: Predicate) -> Self {
        self.having = Some(predicate);
        self
    }

    /// Appends an `ORDER BY` term.
    pub fn order_by(mut self, order: OrderSpecifier) -> Self {
        self.order_by.push(order);
        self
    }

    /// Appends several `ORDER BY` terms.
    pub fn order_by_all<I>(mut self, orders: I) -> Self
    where
        I: IntoIterator<Item = OrderSpecifier>,
    {
        self.order_by.extend(orders);
        self
    }

    /// Sets the offset.
    pub fn offset(mut self, offset: u64) -> Self {
        self.pagination.offset = offset;
        self
    }

    /// Sets the limit.
    pub fn limit(mut self, limit: u64) -> Self {
        self.pagination.limit = Some(limit);
        self
    }

    /// Replaces both pagination bounds.
    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Marks the query `DISTINCT`.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// The same query with ordering and pagination removed; what a count
    /// over this query should see.
    pub fn without_paging(&self) -> Self {
        Self {
            order_by: Vec::new(),
            pagination: Pagination::unbounded(),
            ..self.clone()
        }
    }

    /// Checks the description can be rendered.
    ///
    /// # Errors
    ///
    /// * `QueryError::EmptyProjection` - if nothing is selected
    /// * `QueryError::MissingSource` - if there is no root table
    pub fn validate(&self) -> QueryResult<()> {
        if self.projection.is_empty() {
            return Err(QueryError::EmptyProjection);
        }
        if self.from.is_empty() {
            return Err(QueryError::MissingSource);
        }
        Ok(())
    }

    /// Labels of the projected columns, in order.
    pub fn labels(&self) -> Vec<String> {
        self.projection.iter().map(Expr::label).collect()
    }

    /// Projected items.
    pub fn projection(&self) -> &[Expr] {
        &self.projection
    }

    /// Returns true if `DISTINCT`.
    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// First root table.
    pub fn source(&self) -> Option<&TableRef> {
        self.from.first()
    }

    /// All root tables.
    pub fn sources(&self) -> &[TableRef] {
        &self.from
    }

    /// Joins in declaration order.
    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    /// Row filter.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Grouping keys.
    pub fn grouping(&self) -> &[Expr] {
        &self.group_by
    }

    /// Group filter.
    pub fn having_predicate(&self) -> Option<&Predicate> {
        self.having.as_ref()
    }

    /// Ordering terms.
    pub fn ordering(&self) -> &[OrderSpecifier] {
        &self.order_by
    }

    /// Pagination bounds.
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }
}
