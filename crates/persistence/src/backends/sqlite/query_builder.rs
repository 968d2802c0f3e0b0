//! SQL rendering for SQLite.
//!
//! Translates [`QueryDescription`]s and [`Mutation`]s into SQL text with
//! numbered `?N` placeholders. Placeholders are numbered across the whole
//! statement, subqueries included, so a rendered [`SqlFragment`] binds its
//! params positionally.

use rusqlite::ToSql;

use crate::error::QueryResult;
use crate::query::{
    CaseCondition, CaseExpr, ColumnRef, DeleteQuery, Direction, Expr, Filter, JoinKind, Mutation,
    NullOrdering, Predicate, QueryDescription, TableRef, UpdateQuery,
};
use crate::types::Value;

/// A fragment of SQL with bound parameters.
#[derive(Debug, Clone)]
pub struct SqlFragment {
    /// The SQL text.
    pub sql: String,
    /// Bound parameter values.
    pub params: Vec<SqlParam>,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// String parameter.
    String(String),
    /// Integer parameter.
    Integer(i64),
    /// Float parameter.
    Float(f64),
    /// Null parameter.
    Null,
}

impl SqlParam {
    /// Borrows the parameter as a rusqlite binding.
    pub fn as_sql(&self) -> &dyn ToSql {
        match self {
            SqlParam::String(s) => s,
            SqlParam::Integer(i) => i,
            SqlParam::Float(f) => f,
            SqlParam::Null => &rusqlite::types::Null,
        }
    }
}

impl From<&Value> for SqlParam {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => SqlParam::Null,
            Value::Integer(i) => SqlParam::Integer(*i),
            Value::Real(f) => SqlParam::Float(*f),
            Value::Text(s) => SqlParam::String(s.clone()),
        }
    }
}

impl SqlFragment {
    /// Creates a fragment without parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Parameters as rusqlite bindings, in placeholder order.
    pub fn param_refs(&self) -> Vec<&dyn ToSql> {
        self.params.iter().map(SqlParam::as_sql).collect()
    }
}

/// Renders query descriptions into SQLite SQL.
#[derive(Debug, Default)]
pub struct QueryBuilder {
    params: Vec<SqlParam>,
    /// Qualify columns by table name instead of alias. `UPDATE` and `DELETE`
    /// address their target table unaliased.
    qualify_by_table: bool,
}

impl QueryBuilder {
    /// Creates a builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// `SELECT` for `query`.
    pub fn select(query: &QueryDescription) -> QueryResult<SqlFragment> {
        let mut builder = Self::new();
        let sql = builder.select_sql(query)?;
        Ok(builder.finish(sql))
    }

    /// `SELECT COUNT(*)` over the rows `query` would return without ordering
    /// or pagination.
    pub fn count(query: &QueryDescription) -> QueryResult<SqlFragment> {
        let mut builder = Self::new();
        let inner = builder.select_sql(&query.without_paging())?;
        let sql = format!("SELECT COUNT(*) FROM ({}) AS counted", inner);
        Ok(builder.finish(sql))
    }

    /// `UPDATE` or `DELETE` for `mutation`.
    pub fn mutation(mutation: &Mutation) -> QueryResult<SqlFragment> {
        mutation.validate()?;
        let mut builder = Self {
            qualify_by_table: true,
            ..Self::default()
        };
        let sql = match mutation {
            Mutation::Update(update) => builder.update_sql(update)?,
            Mutation::Delete(delete) => builder.delete_sql(delete)?,
        };
        Ok(builder.finish(sql))
    }

    fn finish(self, sql: String) -> SqlFragment {
        SqlFragment {
            sql,
            params: self.params,
        }
    }

    fn add_param(&mut self, param: SqlParam) -> String {
        self.params.push(param);
        format!("?{}", self.params.len())
    }

    // Statements

    fn select_sql(&mut self, query: &QueryDescription) -> QueryResult<String> {
        query.validate()?;

        let mut sql = String::from("SELECT ");
        if query.is_distinct() {
            sql.push_str("DISTINCT ");
        }

        let mut items = Vec::with_capacity(query.projection().len());
        for item in query.projection() {
            items.push(self.projection_item(item)?);
        }
        sql.push_str(&items.join(", "));

        let sources: Vec<String> = query.sources().iter().map(table_sql).collect();
        sql.push_str(" FROM ");
        sql.push_str(&sources.join(", "));

        for join in query.joins() {
            let keyword = match join.kind {
                JoinKind::Inner => "INNER JOIN",
                JoinKind::Left => "LEFT JOIN",
            };
            let on = self.predicate(&join.on)?;
            sql.push_str(&format!(" {} {} ON {}", keyword, table_sql(&join.table), on));
        }

        if let Some(clause) = self.where_clause(query.filter())? {
            sql.push_str(&clause);
        }

        if !query.grouping().is_empty() {
            let mut keys = Vec::with_capacity(query.grouping().len());
            for key in query.grouping() {
                keys.push(self.expr(key)?);
            }
            sql.push_str(" GROUP BY ");
            sql.push_str(&keys.join(", "));
        }

        if let Some(having) = query.having_predicate() {
            let having = self.predicate(having)?;
            sql.push_str(" HAVING ");
            sql.push_str(&having);
        }

        if !query.ordering().is_empty() {
            let mut terms = Vec::with_capacity(query.ordering().len());
            for order in query.ordering() {
                let mut term = self.expr(&order.expr)?;
                term.push_str(match order.direction {
                    Direction::Asc => " ASC",
                    Direction::Desc => " DESC",
                });
                term.push_str(match order.nulls {
                    NullOrdering::Default => "",
                    NullOrdering::First => " NULLS FIRST",
                    NullOrdering::Last => " NULLS LAST",
                });
                terms.push(term);
            }
            sql.push_str(" ORDER BY ");
            sql.push_str(&terms.join(", "));
        }

        let pagination = query.pagination();
        match pagination.limit {
            Some(limit) => sql.push_str(&format!(" LIMIT {}", sqlite_bound(limit))),
            // SQLite only accepts OFFSET after a LIMIT
            None if pagination.offset > 0 => sql.push_str(" LIMIT -1"),
            None => {}
        }
        if pagination.offset > 0 {
            sql.push_str(&format!(" OFFSET {}", sqlite_bound(pagination.offset)));
        }

        Ok(sql)
    }

    fn update_sql(&mut self, update: &UpdateQuery) -> QueryResult<String> {
        let mut assignments = Vec::with_capacity(update.assignments().len());
        for (column, value) in update.assignments() {
            let value = self.expr(value)?;
            assignments.push(format!("{} = {}", quote(column.name), value));
        }

        let mut sql = format!(
            "UPDATE {} SET {}",
            quote(update.table().name),
            assignments.join(", ")
        );
        if let Some(clause) = self.where_clause(update.filter())? {
            sql.push_str(&clause);
        }
        Ok(sql)
    }

    fn delete_sql(&mut self, delete: &DeleteQuery) -> QueryResult<String> {
        let mut sql = format!("DELETE FROM {}", quote(delete.table().name));
        if let Some(clause) = self.where_clause(delete.filter())? {
            sql.push_str(&clause);
        }
        Ok(sql)
    }

    fn where_clause(&mut self, filter: &Filter) -> QueryResult<Option<String>> {
        match filter.predicate() {
            Some(predicate) => Ok(Some(format!(" WHERE {}", self.predicate(predicate)?))),
            None => Ok(None),
        }
    }

    // Expressions

    fn projection_item(&mut self, item: &Expr) -> QueryResult<String> {
        match item {
            Expr::Aliased { expr, alias } => {
                Ok(format!("{} AS {}", self.expr(expr)?, quote(alias)))
            }
            other => self.expr(other),
        }
    }

    fn column(&self, column: &ColumnRef) -> String {
        let qualifier = if self.qualify_by_table {
            column.table
        } else {
            column.alias.as_str()
        };
        format!("{}.{}", quote(qualifier), quote(column.name))
    }

    fn expr(&mut self, expr: &Expr) -> QueryResult<String> {
        let sql = match expr {
            Expr::Column(column) => self.column(column),
            Expr::Literal(value) => self.add_param(SqlParam::from(value)),
            Expr::CountAll => "count(*)".to_string(),
            Expr::Aggregate { func, arg } => format!("{}({})", func.sql(), self.expr(arg)?),
            Expr::Arithmetic { lhs, op, rhs } => {
                format!("({} {} {})", self.expr(lhs)?, op.sql(), self.expr(rhs)?)
            }
            Expr::Concat(parts) => {
                let mut rendered = Vec::with_capacity(parts.len());
                for part in parts {
                    rendered.push(self.expr(part)?);
                }
                format!("({})", rendered.join(" || "))
            }
            Expr::StringValue(inner) => format!("CAST({} AS TEXT)", self.expr(inner)?),
            Expr::Function { func, args } => {
                let mut rendered = Vec::with_capacity(args.len());
                for arg in args {
                    rendered.push(self.expr(arg)?);
                }
                format!("{}({})", func.sql(), rendered.join(", "))
            }
            Expr::Case(case) => self.case(case)?,
            Expr::Subquery(query) => format!("({})", self.subquery(query)?),
            Expr::Aliased { expr, .. } => self.expr(expr)?,
        };
        Ok(sql)
    }

    fn case(&mut self, case: &CaseExpr) -> QueryResult<String> {
        let mut sql = String::from("CASE");
        if let Some(operand) = &case.operand {
            sql.push(' ');
            sql.push_str(&self.expr(operand)?);
        }
        for (condition, result) in &case.branches {
            let condition = match condition {
                CaseCondition::Value(value) => self.expr(value)?,
                CaseCondition::Predicate(predicate) => self.predicate(predicate)?,
            };
            let result = self.expr(result)?;
            sql.push_str(&format!(" WHEN {} THEN {}", condition, result));
        }
        if let Some(otherwise) = &case.otherwise {
            sql.push_str(&format!(" ELSE {}", self.expr(otherwise)?));
        }
        sql.push_str(" END");
        Ok(sql)
    }

    /// Subqueries always address their tables by alias.
    fn subquery(&mut self, query: &QueryDescription) -> QueryResult<String> {
        let outer = std::mem::replace(&mut self.qualify_by_table, false);
        let result = self.select_sql(query);
        self.qualify_by_table = outer;
        result
    }

    // Predicates

    fn predicate(&mut self, predicate: &Predicate) -> QueryResult<String> {
        let sql = match predicate {
            Predicate::Compare { lhs, op, rhs } => {
                format!("{} {} {}", self.expr(lhs)?, op.sql(), self.expr(rhs)?)
            }
            Predicate::Between { expr, low, high } => format!(
                "{} BETWEEN {} AND {}",
                self.expr(expr)?,
                self.expr(low)?,
                self.expr(high)?
            ),
            Predicate::InList { values, .. } if values.is_empty() => "1 = 0".to_string(),
            Predicate::InList { expr, values } => {
                let lhs = self.expr(expr)?;
                let mut rendered = Vec::with_capacity(values.len());
                for value in values {
                    rendered.push(self.expr(value)?);
                }
                format!("{} IN ({})", lhs, rendered.join(", "))
            }
            Predicate::InSubquery { expr, query } => {
                let lhs = self.expr(expr)?;
                format!("{} IN ({})", lhs, self.subquery(query)?)
            }
            Predicate::IsNull(expr) => format!("{} IS NULL", self.expr(expr)?),
            Predicate::IsNotNull(expr) => format!("{} IS NOT NULL", self.expr(expr)?),
            Predicate::Like { expr, pattern } => {
                format!("{} LIKE {}", self.expr(expr)?, self.expr(pattern)?)
            }
            Predicate::And(parts) => self.junction(parts, " AND ", "1 = 1")?,
            Predicate::Or(parts) => self.junction(parts, " OR ", "1 = 0")?,
            Predicate::Not(inner) => format!("NOT ({})", self.predicate(inner)?),
        };
        Ok(sql)
    }

    fn junction(
        &mut self,
        parts: &[Predicate],
        separator: &str,
        empty: &str,
    ) -> QueryResult<String> {
        match parts {
            [] => Ok(empty.to_string()),
            [single] => self.predicate(single),
            _ => {
                let mut rendered = Vec::with_capacity(parts.len());
                for part in parts {
                    rendered.push(format!("({})", self.predicate(part)?));
                }
                Ok(rendered.join(separator))
            }
        }
    }
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Bounds past `i64::MAX` would render as REAL literals; clamp them into
/// SQLite's integer range.
fn sqlite_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn table_sql(table: &TableRef) -> String {
    format!("{} AS {}", quote(table.name), quote(&table.alias))
}
