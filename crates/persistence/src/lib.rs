//! Roster Persistence Layer
//!
//! This crate stores members and the teams they belong to, and searches them
//! with a typed, composable query layer. Queries are plain data handed to an
//! executor; the executor is the only component that talks to a database.
//!
//! # Features
//!
//! - **Dynamic member search**: any combination of optional criteria becomes
//!   one filtered, joined, sorted and paginated query
//! - **Typed query construction**: joins, subqueries, `CASE`, aggregates,
//!   grouping, projections into entities, DTOs, tuples and scalars
//! - **Bulk statements**: `UPDATE` and `DELETE` with affected-row counts
//! - **Pluggable execution**: anything implementing
//!   [`QueryExecutor`](core::QueryExecutor) can run the queries
//!
//! # Backend Features
//!
//! ```toml
//! [dependencies]
//! roster-persistence = { version = "0.1", features = ["sqlite"] }
//! ```
//!
//! Available backend features:
//! - `sqlite` (default) - SQLite with in-memory and file modes
//!
//! # Architecture
//!
//! - [`types`] - Entities, search criteria, pagination, rows and DTOs
//! - [`query`] - Metamodels, expressions, predicates and query descriptions
//! - [`core`] - Executor and storage traits, query factory, member repository
//! - [`error`] - Error types for all operations
//! - [`backends`] - Backend implementations (SQLite)
//!
//! # Member Search
//!
//! ```
//! use roster_persistence::query::{member_search_filter, Filter, MemberQueryComposer};
//! use roster_persistence::types::{MemberSearchCondition, Pagination};
//!
//! let condition = MemberSearchCondition::new()
//!     .with_team_name("teamB")
//!     .with_age_goe(35)
//!     .with_age_loe(40);
//!
//! // One atomic predicate per present field
//! let filter = member_search_filter(&condition);
//! assert_eq!(filter.atoms(), 3);
//!
//! // No criteria at all matches every member
//! assert_eq!(member_search_filter(&MemberSearchCondition::new()), Filter::MatchAll);
//!
//! // member LEFT JOIN team, paginated
//! let composer = MemberQueryComposer::default();
//! let query = composer.compose(filter, Vec::new(), Pagination::page(0, 10));
//! assert_eq!(query.joins().len(), 1);
//! ```
//!
//! # Typed Queries
//!
//! ```
//! use roster_persistence::query::{QMember, QTeam, QueryDescription};
//!
//! let member = QMember::member();
//! let team = QTeam::team();
//!
//! // Average age per team, for teams averaging over 20
//! let query = QueryDescription::select([team.name.expr().clone(), member.age.avg()])
//!     .from(&member)
//!     .inner_join(&team, member.team_fk(&team))
//!     .group_by([team.name.expr().clone()])
//!     .having(member.age.avg().gt(20));
//!
//! assert_eq!(query.labels(), vec!["name", "avg(age)"]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod query;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use types::{Member, MemberSearchCondition, MemberTeamDto, Pagination, QueryResults, Team};

// Re-export core traits
pub use core::{Backend, BackendKind, EntityStorage, MemberRepository, QueryExecutor, QueryFactory};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
