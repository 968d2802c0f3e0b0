//! Test infrastructure for the persistence layer.
//!
//! Shared backend setup, tracing initialisation and the team/member fixtures
//! the integration tests seed before querying.

#![allow(dead_code)]

pub mod fixtures;
pub mod harness;

// Re-export commonly used items
pub use fixtures::*;
pub use harness::*;
