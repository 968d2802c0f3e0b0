//! Core storage traits and abstractions.
//!
//! This module provides the foundational traits for the persistence layer:
//!
//! - [`Backend`] - Database driver abstraction and capability discovery
//! - [`QueryExecutor`] - Runs query descriptions and bulk statements
//! - [`EntityStorage`] - Writes and primary-key reads of members and teams
//! - [`QueryFactory`] - Typed fetch terminals over any executor
//! - [`MemberRepository`] - Member persistence and the dynamic member search
//!
//! # Layering
//!
//! ```text
//! MemberRepository ──► QueryFactory ──► QueryExecutor ◄── SqliteBackend
//!        │                                                    │
//!        └──────────────► EntityStorage ◄─────────────────────┘
//! ```
//!
//! The repository and the factory never see SQL. They build
//! [`QueryDescription`](crate::query::QueryDescription)s and hand them to an
//! executor, so any type implementing [`QueryExecutor`] can back a search.

pub mod backend;
pub mod executor;
pub mod factory;
pub mod repository;
pub mod storage;

// Re-export main types
pub use backend::{Backend, BackendCapability, BackendKind, BackendPoolStats};
pub use executor::QueryExecutor;
pub use factory::QueryFactory;
pub use repository::MemberRepository;
pub use storage::EntityStorage;
