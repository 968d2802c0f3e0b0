//! Scalar expressions.
//!
//! An [`Expr`] is anything that evaluates to a value per row: a column, a
//! literal, an aggregate, a `CASE`, a scalar subquery and so on. Comparison
//! methods on `Expr` produce [`Predicate`]s; ordering methods produce
//! [`OrderSpecifier`]s.

use std::ops::Deref;

use crate::types::Value;

use super::predicate::{CompareOp, Predicate};
use super::select::{Direction, OrderSpecifier, QueryDescription};

/// A column qualified by the alias of the table it is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    /// Physical table name.
    pub table: &'static str,
    /// Alias the table is bound to in a query.
    pub alias: String,
    /// Column name.
    pub name: &'static str,
}

/// Aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunc {
    /// Non-null values.
    Count,
    /// Total.
    Sum,
    /// Mean.
    Avg,
    /// Largest value.
    Max,
    /// Smallest value.
    Min,
}

impl AggregateFunc {
    /// SQL function name.
    pub fn sql(&self) -> &'static str {
        match self {
            AggregateFunc::Count => "count",
            AggregateFunc::Sum => "sum",
            AggregateFunc::Avg => "avg",
            AggregateFunc::Max => "max",
            AggregateFunc::Min => "min",
        }
    }
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

impl ArithmeticOp {
    /// SQL operator.
    pub fn sql(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Subtract => "-",
            ArithmeticOp::Multiply => "*",
            ArithmeticOp::Divide => "/",
        }
    }
}

/// Scalar SQL functions available to expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlFunction {
    /// `replace(text, from, to)`
    Replace,
    /// `lower(text)`
    Lower,
    /// `upper(text)`
    Upper,
    /// First non-null argument.
    Coalesce,
}

impl SqlFunction {
    /// SQL function name.
    pub fn sql(&self) -> &'static str {
        match self {
            SqlFunction::Replace => "replace",
            SqlFunction::Lower => "lower",
            SqlFunction::Upper => "upper",
            SqlFunction::Coalesce => "coalesce",
        }
    }
}

/// A scalar expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A table column.
    Column(ColumnRef),
    /// A bound constant.
    Literal(Value),
    /// `count(*)`
    CountAll,
    /// `func(arg)`
    Aggregate {
        /// Aggregate function.
        func: AggregateFunc,
        /// Aggregated expression.
        arg: Box<Expr>,
    },
    /// `lhs op rhs`
    Arithmetic {
        /// Left operand.
        lhs: Box<Expr>,
        /// Operator.
        op: ArithmeticOp,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// String concatenation of every part.
    Concat(Vec<Expr>),
    /// Cast to text.
    StringValue(Box<Expr>),
    /// Scalar function call.
    Function {
        /// Function.
        func: SqlFunction,
        /// Arguments, in call order.
        args: Vec<Expr>,
    },
    /// `CASE ... END`
    Case(Box<CaseExpr>),
    /// Scalar subquery.
    Subquery(Box<QueryDescription>),
    /// Projection label. Outside a projection the alias is ignored.
    Aliased {
        /// Labelled expression.
        expr: Box<Expr>,
        /// Label.
        alias: String,
    },
}

impl Expr {
    /// A literal constant.
    pub fn constant(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    /// `count(*)`.
    pub fn count_all() -> Self {
        Expr::CountAll
    }

    /// A scalar function call.
    pub fn function(func: SqlFunction, args: Vec<Expr>) -> Self {
        Expr::Function { func, args }
    }

    /// The column this expression reads, if it is a bare column.
    pub fn as_column(&self) -> Option<&ColumnRef> {
        match self {
            Expr::Column(column) => Some(column),
            Expr::Aliased { expr, .. } => expr.as_column(),
            _ => None,
        }
    }

    /// Label this expression yields as a projection column.
    pub fn label(&self) -> String {
        match self {
            Expr::Column(column) => column.name.to_string(),
            Expr::Aliased { alias, .. } => alias.clone(),
            Expr::CountAll => "count(*)".to_string(),
            Expr::Aggregate { func, arg } => format!("{}({})", func.sql(), arg.label()),
            Expr::Function { func, .. } => func.sql().to_string(),
            Expr::Literal(value) => value.to_string(),
            _ => "expr".to_string(),
        }
    }

    // Comparisons

    fn compare(&self, op: CompareOp, rhs: impl Into<Expr>) -> Predicate {
        Predicate::Compare {
            lhs: self.clone(),
            op,
            rhs: rhs.into(),
        }
    }

    /// `self = rhs`
    pub fn eq(&self, rhs: impl Into<Expr>) -> Predicate {
        self.compare(CompareOp::Eq, rhs)
    }

    /// `self <> rhs`
    pub fn ne(&self, rhs: impl Into<Expr>) -> Predicate {
        self.compare(CompareOp::Ne, rhs)
    }

    /// `self > rhs`
    pub fn gt(&self, rhs: impl Into<Expr>) -> Predicate {
        self.compare(CompareOp::Gt, rhs)
    }

    /// `self >= rhs`
    pub fn goe(&self, rhs: impl Into<Expr>) -> Predicate {
        self.compare(CompareOp::Ge, rhs)
    }

    /// `self < rhs`
    pub fn lt(&self, rhs: impl Into<Expr>) -> Predicate {
        self.compare(CompareOp::Lt, rhs)
    }

    /// `self <= rhs`
    pub fn loe(&self, rhs: impl Into<Expr>) -> Predicate {
        self.compare(CompareOp::Le, rhs)
    }

    /// `self BETWEEN low AND high`, inclusive on both ends.
    pub fn between(&self, low: impl Into<Expr>, high: impl Into<Expr>) -> Predicate {
        Predicate::Between {
            expr: self.clone(),
            low: low.into(),
            high: high.into(),
        }
    }

    /// `self IN (values...)`
    pub fn in_list<I, V>(&self, values: I) -> Predicate
    where
        I: IntoIterator<Item = V>,
        V: Into<Expr>,
    {
        Predicate::InList {
            expr: self.clone(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// `self IN (SELECT ...)`
    pub fn in_subquery(&self, query: QueryDescription) -> Predicate {
        Predicate::InSubquery {
            expr: self.clone(),
            query: Box::new(query),
        }
    }

    /// `self IS NULL`
    pub fn is_null(&self) -> Predicate {
        Predicate::IsNull(self.clone())
    }

    /// `self IS NOT NULL`
    pub fn is_not_null(&self) -> Predicate {
        Predicate::IsNotNull(self.clone())
    }

    /// `self LIKE pattern`
    pub fn like(&self, pattern: impl Into<String>) -> Predicate {
        Predicate::Like {
            expr: self.clone(),
            pattern: Expr::Literal(Value::Text(pattern.into())),
        }
    }

    /// `self LIKE '%needle%'`
    pub fn contains(&self, needle: &str) -> Predicate {
        self.like(format!("%{}%", needle))
    }

    /// `self LIKE 'prefix%'`
    pub fn starts_with(&self, prefix: &str) -> Predicate {
        self.like(format!("{}%", prefix))
    }

    // Aggregates

    fn aggregate(&self, func: AggregateFunc) -> Expr {
        Expr::Aggregate {
            func,
            arg: Box::new(self.clone()),
        }
    }

    /// `count(self)`
    pub fn count(&self) -> Expr {
        self.aggregate(AggregateFunc::Count)
    }

    /// `sum(self)`
    pub fn sum(&self) -> Expr {
        self.aggregate(AggregateFunc::Sum)
    }

    /// `avg(self)`
    pub fn avg(&self) -> Expr {
        self.aggregate(AggregateFunc::Avg)
    }

    /// `max(self)`
    pub fn max(&self) -> Expr {
        self.aggregate(AggregateFunc::Max)
    }

    /// `min(self)`
    pub fn min(&self) -> Expr {
        self.aggregate(AggregateFunc::Min)
    }

    // Arithmetic and strings

    fn arithmetic(&self, op: ArithmeticOp, rhs: impl Into<Expr>) -> Expr {
        Expr::Arithmetic {
            lhs: Box::new(self.clone()),
            op,
            rhs: Box::new(rhs.into()),
        }
    }

    /// `self + rhs`
    pub fn add(&self, rhs: impl Into<Expr>) -> Expr {
        self.arithmetic(ArithmeticOp::Add, rhs)
    }

    /// `self - rhs`
    pub fn subtract(&self, rhs: impl Into<Expr>) -> Expr {
        self.arithmetic(ArithmeticOp::Subtract, rhs)
    }

    /// `self * rhs`
    pub fn multiply(&self, rhs: impl Into<Expr>) -> Expr {
        self.arithmetic(ArithmeticOp::Multiply, rhs)
    }

    /// `self / rhs`
    pub fn divide(&self, rhs: impl Into<Expr>) -> Expr {
        self.arithmetic(ArithmeticOp::Divide, rhs)
    }

    /// `self || rhs`, flattening chained concatenations.
    pub fn concat(&self, rhs: impl Into<Expr>) -> Expr {
        let mut parts = match self {
            Expr::Concat(parts) => parts.clone(),
            other => vec![other.clone()],
        };
        parts.push(rhs.into());
        Expr::Concat(parts)
    }

    /// The value rendered as text.
    pub fn string_value(&self) -> Expr {
        Expr::StringValue(Box::new(self.clone()))
    }

    /// `lower(self)`
    pub fn lower(&self) -> Expr {
        Expr::function(SqlFunction::Lower, vec![self.clone()])
    }

    /// `upper(self)`
    pub fn upper(&self) -> Expr {
        Expr::function(SqlFunction::Upper, vec![self.clone()])
    }

    /// `replace(self, from, to)`
    pub fn replace(&self, from: impl Into<Expr>, to: impl Into<Expr>) -> Expr {
        Expr::function(
            SqlFunction::Replace,
            vec![self.clone(), from.into(), to.into()],
        )
    }

    /// `coalesce(self, fallback)`
    pub fn coalesce(&self, fallback: impl Into<Expr>) -> Expr {
        Expr::function(SqlFunction::Coalesce, vec![self.clone(), fallback.into()])
    }

    /// Projects this expression under `alias`.
    pub fn as_alias(&self, alias: impl Into<String>) -> Expr {
        let inner = match self {
            Expr::Aliased { expr, .. } => (**expr).clone(),
            other => other.clone(),
        };
        Expr::Aliased {
            expr: Box::new(inner),
            alias: alias.into(),
        }
    }

    // Ordering

    /// Ascending order on this expression.
    pub fn asc(&self) -> OrderSpecifier {
        OrderSpecifier::new(self.clone(), Direction::Asc)
    }

    /// Descending order on this expression.
    pub fn desc(&self) -> OrderSpecifier {
        OrderSpecifier::new(self.clone(), Direction::Desc)
    }

    // Case

    /// Starts a simple `CASE self WHEN value THEN ...` expression.
    pub fn when(&self, value: impl Into<Expr>) -> SimpleCaseWhen {
        SimpleCaseWhen {
            operand: self.clone(),
            branches: Vec::new(),
            pending: value.into(),
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Literal(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<&Expr> for Expr {
    fn from(expr: &Expr) -> Self {
        expr.clone()
    }
}

impl From<QueryDescription> for Expr {
    fn from(query: QueryDescription) -> Self {
        Expr::Subquery(Box::new(query))
    }
}

/// A typed column path on a metamodel.
///
/// Dereferences to the column [`Expr`], so every expression method is
/// available directly (`member.age.goe(10)`). Not `PartialEq`, so
/// `column.eq(value)` resolves to [`Expr::eq`].
#[derive(Debug, Clone)]
pub struct Column {
    reference: ColumnRef,
    expr: Expr,
}

impl Column {
    /// Binds `name` of `table` under `alias`.
    pub fn new(table: &'static str, alias: impl Into<String>, name: &'static str) -> Self {
        let reference = ColumnRef {
            table,
            alias: alias.into(),
            name,
        };
        Self {
            expr: Expr::Column(reference.clone()),
            reference,
        }
    }

    /// The qualified column reference.
    pub fn reference(&self) -> &ColumnRef {
        &self.reference
    }

    /// The column as an expression.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl Deref for Column {
    type Target = Expr;

    fn deref(&self) -> &Expr {
        &self.expr
    }
}

impl From<&Column> for Expr {
    fn from(column: &Column) -> Self {
        column.expr.clone()
    }
}

impl From<Column> for Expr {
    fn from(column: Column) -> Self {
        column.expr
    }
}

/// What a `CASE` branch matches on.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseCondition {
    /// Simple case: the operand equals this value.
    Value(Expr),
    /// Searched case: this predicate holds.
    Predicate(Predicate),
}

/// `CASE [operand] WHEN ... THEN ... [ELSE ...] END`
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    /// Operand of a simple case; `None` for a searched case.
    pub operand: Option<Expr>,
    /// `WHEN ... THEN ...` branches, in order.
    pub branches: Vec<(CaseCondition, Expr)>,
    /// `ELSE` result.
    pub otherwise: Option<Expr>,
}

/// Simple case awaiting the `THEN` of its latest `WHEN`.
#[derive(Debug, Clone)]
pub struct SimpleCaseWhen {
    operand: Expr,
    branches: Vec<(CaseCondition, Expr)>,
    pending: Expr,
}

impl SimpleCaseWhen {
    /// Result for the pending `WHEN`.
    pub fn then(mut self, result: impl Into<Expr>) -> SimpleCases {
        self.branches
            .push((CaseCondition::Value(self.pending), result.into()));
        SimpleCases {
            operand: self.operand,
            branches: self.branches,
        }
    }
}

/// Simple case with at least one complete branch.
#[derive(Debug, Clone)]
pub struct SimpleCases {
    operand: Expr,
    branches: Vec<(CaseCondition, Expr)>,
}

impl SimpleCases {
    /// Adds another `WHEN value`.
    pub fn when(self, value: impl Into<Expr>) -> SimpleCaseWhen {
        SimpleCaseWhen {
            operand: self.operand,
            branches: self.branches,
            pending: value.into(),
        }
    }

    /// Closes the case with an `ELSE`.
    pub fn otherwise(self, result: impl Into<Expr>) -> Expr {
        Expr::Case(Box::new(CaseExpr {
            operand: Some(self.operand),
            branches: self.branches,
            otherwise: Some(result.into()),
        }))
    }

    /// Closes the case without an `ELSE`; unmatched rows yield null.
    pub fn end(self) -> Expr {
        Expr::Case(Box::new(CaseExpr {
            operand: Some(self.operand),
            branches: self.branches,
            otherwise: None,
        }))
    }
}

/// Entry point for searched `CASE WHEN predicate THEN ...` expressions.
///
/// ```
/// use roster_persistence::query::{CaseBuilder, QMember};
///
/// let member = QMember::member();
/// let bracket = CaseBuilder::new()
///     .when(member.age.between(0, 20)).then("0-20")
///     .when(member.age.between(21, 30)).then("21-30")
///     .otherwise("other");
/// assert_eq!(bracket.label(), "expr");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaseBuilder;

impl CaseBuilder {
    /// Creates the builder.
    pub fn new() -> Self {
        Self
    }

    /// First `WHEN`.
    pub fn when(self, condition: Predicate) -> CaseWhen {
        CaseWhen {
            branches: Vec::new(),
            pending: condition,
        }
    }
}

/// Searched case awaiting the `THEN` of its latest `WHEN`.
#[derive(Debug, Clone)]
pub struct CaseWhen {
    branches: Vec<(CaseCondition, Expr)>,
    pending: Predicate,
}

impl CaseWhen {
    /// Result for the pending `WHEN`.
    pub fn then(mut self, result: impl Into<Expr>) -> Cases {
        self.branches
            .push((CaseCondition::Predicate(self.pending), result.into()));
        Cases {
            branches: self.branches,
        }
    }
}

/// Searched case with at least one complete branch.
#[derive(Debug, Clone)]
pub struct Cases {
    branches: Vec<(CaseCondition, Expr)>,
}

impl Cases {
    /// Adds another `WHEN predicate`.
    pub fn when(self, condition: Predicate) -> CaseWhen {
        CaseWhen {
            branches: self.branches,
            pending: condition,
        }
    }

    /// Closes the case with an `ELSE`.
    pub fn otherwise(self, result: impl Into<Expr>) -> Expr {
        Expr::Case(Box::new(CaseExpr {
            operand: None,
            branches: self.branches,
            otherwise: Some(result.into()),
        }))
    }
}
