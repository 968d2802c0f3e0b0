//! Typed metamodels of the `member` and `team` tables.
//!
//! A metamodel binds a table to an alias and exposes its columns as
//! [`Column`] paths. Two instances of the same metamodel under different
//! aliases can appear in one query, e.g. an outer `member` and a `member_sub`
//! inside a subquery.

use super::expr::{Column, Expr};
use super::predicate::Predicate;

/// A table bound to an alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Physical table name.
    pub name: &'static str,
    /// Alias within the query.
    pub alias: String,
}

/// A selectable entity: a table plus its ordered columns.
pub trait EntityPath {
    /// The aliased table.
    fn table(&self) -> &TableRef;

    /// All columns in storage order. Selecting these yields rows the
    /// entity's `FromRow` impl can decode.
    fn columns(&self) -> Vec<Expr>;
}

/// Metamodel of the `member` table.
#[derive(Debug, Clone)]
pub struct QMember {
    table: TableRef,
    /// `member.id`
    pub id: Column,
    /// `member.username`
    pub username: Column,
    /// `member.age`
    pub age: Column,
    /// `member.team_id`
    pub team_id: Column,
}

impl QMember {
    /// Table name.
    pub const TABLE: &'static str = "member";

    /// Binds the table under `alias`.
    pub fn new(alias: impl Into<String>) -> Self {
        let alias = alias.into();
        Self {
            id: Column::new(Self::TABLE, alias.clone(), "id"),
            username: Column::new(Self::TABLE, alias.clone(), "username"),
            age: Column::new(Self::TABLE, alias.clone(), "age"),
            team_id: Column::new(Self::TABLE, alias.clone(), "team_id"),
            table: TableRef {
                name: Self::TABLE,
                alias,
            },
        }
    }

    /// The default `member` alias.
    pub fn member() -> Self {
        Self::new("member")
    }

    /// Join condition from this member to `team`.
    pub fn team_fk(&self, team: &QTeam) -> Predicate {
        self.team_id.eq(&team.id)
    }
}

impl EntityPath for QMember {
    fn table(&self) -> &TableRef {
        &self.table
    }

    fn columns(&self) -> Vec<Expr> {
        vec![
            self.id.expr().clone(),
            self.username.expr().clone(),
            self.age.expr().clone(),
            self.team_id.expr().clone(),
        ]
    }
}

/// Metamodel of the `team` table.
#[derive(Debug, Clone)]
pub struct QTeam {
    table: TableRef,
    /// `team.id`
    pub id: Column,
    /// `team.name`
    pub name: Column,
}

impl QTeam {
    /// Table name.
    pub const TABLE: &'static str = "team";

    /// Binds the table under `alias`.
    pub fn new(alias: impl Into<String>) -> Self {
        let alias = alias.into();
        Self {
            id: Column::new(Self::TABLE, alias.clone(), "id"),
            name: Column::new(Self::TABLE, alias.clone(), "name"),
            table: TableRef {
                name: Self::TABLE,
                alias,
            },
        }
    }

    /// The default `team` alias.
    pub fn team() -> Self {
        Self::new("team")
    }
}

impl EntityPath for QTeam {
    fn table(&self) -> &TableRef {
        &self.table
    }

    fn columns(&self) -> Vec<Expr> {
        vec![self.id.expr().clone(), self.name.expr().clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Member, Team};

    #[test]
    fn test_column_order_matches_entity_width() {
        assert_eq!(QMember::member().columns().len(), Member::WIDTH);
        assert_eq!(QTeam::team().columns().len(), Team::WIDTH);
    }

    #[test]
    fn test_alias_propagates_to_columns() {
        let sub = QMember::new("member_sub");
        assert_eq!(sub.table().alias, "member_sub");
        assert_eq!(sub.age.reference().alias, "member_sub");
        assert_eq!(sub.age.reference().table, "member");
    }
}
