//! SQLite backend implementation.
//!
//! Supports both in-memory databases (for tests) and file-based databases.
//! Queries are rendered by [`QueryBuilder`] into parameterised SQL and run on
//! connections checked out from an r2d2 pool; every call checks out its own
//! connection.
//!
//! # Example
//!
//! ```no_run
//! use roster_persistence::backends::sqlite::SqliteBackend;
//! use roster_persistence::core::MemberRepository;
//! use roster_persistence::types::{MemberSearchCondition, Pagination};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! let repository = MemberRepository::new(backend);
//! let condition = MemberSearchCondition::new().with_age_goe(35);
//! let members = repository.search(&condition, Pagination::unbounded()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE team (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     name TEXT NOT NULL
//! );
//!
//! CREATE TABLE member (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     username TEXT,
//!     age INTEGER NOT NULL,
//!     team_id INTEGER REFERENCES team(id)
//! );
//!
//! CREATE INDEX idx_member_team_id ON member(team_id);
//! ```

mod backend;
mod executor;
mod query_builder;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use query_builder::{QueryBuilder, SqlFragment, SqlParam};
