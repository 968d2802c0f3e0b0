//! Core types for the persistence layer.
//!
//! This module provides the fundamental types used throughout the persistence layer:
//!
//! - [`Member`], [`Team`] - The domain entities
//! - [`MemberSearchCondition`] - Optional criteria for a member search
//! - [`Pagination`], [`QueryResults`] - Offset pagination and paged results
//! - [`Row`], [`Value`] - Raw executor output and its decoding traits
//! - [`MemberTeamDto`], [`MemberDto`], [`UserDto`] - Flat projections
//!
//! # Examples
//!
//! ## Search criteria
//!
//! ```
//! use roster_persistence::types::MemberSearchCondition;
//!
//! let condition = MemberSearchCondition::new()
//!     .with_username("member1")
//!     .with_age_goe(10);
//!
//! assert_eq!(condition.present_fields(), 2);
//! ```
//!
//! ## Pagination
//!
//! ```
//! use roster_persistence::types::Pagination;
//!
//! let page = Pagination::new(1, Some(2)).unwrap();
//! assert_eq!(page.offset, 1);
//! assert_eq!(page.limit, Some(2));
//!
//! // Negative bounds are a caller error, never clamped.
//! assert!(Pagination::new(-1, None).is_err());
//! ```

mod dto;
mod entity;
mod pagination;
mod row;
mod search_condition;

pub use dto::{MemberDto, MemberTeamDto, UserDto};
pub use entity::{Member, NewMember, NewTeam, Team};
pub use pagination::{Pagination, QueryResults};
pub use row::{FromRow, FromValue, Row, Value};
pub use search_condition::MemberSearchCondition;
