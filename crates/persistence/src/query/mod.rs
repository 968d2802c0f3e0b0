//! Typed query construction.
//!
//! Queries are plain data. The metamodels in [`schema`] expose columns as
//! typed paths; expressions and predicates are built from them and collected
//! into a [`QueryDescription`] (select) or a [`Mutation`] (bulk update or
//! delete). A [`QueryExecutor`](crate::core::QueryExecutor) renders and runs
//! them.
//!
//! # Dynamic filters
//!
//! Optional conditions are composed with [`Filter::all_of`]: absent parts
//! are skipped, and no parts at all means [`Filter::MatchAll`].
//!
//! ```
//! use roster_persistence::query::{Filter, QMember, QTeam, QueryDescription};
//!
//! let member = QMember::member();
//! let team = QTeam::team();
//!
//! let username: Option<&str> = None;
//! let min_age = Some(35);
//!
//! let query = QueryDescription::select_from(&member)
//!     .left_join(&team, member.team_fk(&team))
//!     .with_filter(Filter::all_of([
//!         username.map(|u| member.username.eq(u)),
//!         min_age.map(|a| member.age.goe(a)),
//!     ]));
//!
//! assert_eq!(query.filter().atoms(), 1);
//! ```
//!
//! The member search itself is assembled by [`member_search_filter`] and
//! [`MemberQueryComposer`].

mod builder;
mod composer;
mod expr;
mod mutation;
mod predicate;
mod schema;
mod select;

pub use builder::{MemberSearchPredicates, member_search_filter};
pub use composer::MemberQueryComposer;
pub use expr::{
    AggregateFunc, ArithmeticOp, CaseBuilder, CaseCondition, CaseExpr, CaseWhen, Cases, Column,
    ColumnRef, Expr, SimpleCaseWhen, SimpleCases, SqlFunction,
};
pub use mutation::{DeleteQuery, Mutation, UpdateQuery};
pub use predicate::{CompareOp, Filter, Predicate};
pub use schema::{EntityPath, QMember, QTeam, TableRef};
pub use select::{Direction, Join, JoinKind, NullOrdering, OrderSpecifier, QueryDescription};
