//! Entity storage trait.
//!
//! This module defines the [`EntityStorage`] trait: the minimal write and
//! primary-key read operations needed to populate and inspect members and
//! teams. Everything else is read through a [`QueryExecutor`](super::QueryExecutor).

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{Member, NewMember, NewTeam, Team};

/// Storage of members and teams.
///
/// # Example
///
/// ```ignore
/// use roster_persistence::core::EntityStorage;
/// use roster_persistence::types::{NewMember, NewTeam};
///
/// async fn seed<S: EntityStorage>(storage: &S) -> StorageResult<()> {
///     let team = storage.save_team(NewTeam::new("teamA")).await?;
///     let member = storage
///         .save_member(NewMember::new("member1", 10).with_team(&team))
///         .await?;
///     assert_eq!(member.team_id, Some(team.id));
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait EntityStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Persists a team and returns it with its assigned id.
    async fn save_team(&self, team: NewTeam) -> StorageResult<Team>;

    /// Persists a member and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// * `StorageError::Backend` - If `team_id` references no team and the
    ///   backend enforces foreign keys
    async fn save_member(&self, member: NewMember) -> StorageResult<Member>;

    /// Reads a member by id.
    async fn find_member(&self, id: i64) -> StorageResult<Option<Member>>;

    /// Reads a team by id.
    async fn find_team(&self, id: i64) -> StorageResult<Option<Team>>;

    /// Moves a member to another team, or out of any team with `None`.
    /// Returns the updated member, or `None` if no member has that id.
    async fn change_team(
        &self,
        member_id: i64,
        team_id: Option<i64>,
    ) -> StorageResult<Option<Member>>;
}

#[async_trait]
impl<T: EntityStorage + ?Sized> EntityStorage for Arc<T> {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    async fn save_team(&self, team: NewTeam) -> StorageResult<Team> {
        (**self).save_team(team).await
    }

    async fn save_member(&self, member: NewMember) -> StorageResult<Member> {
        (**self).save_member(member).await
    }

    async fn find_member(&self, id: i64) -> StorageResult<Option<Member>> {
        (**self).find_member(id).await
    }

    async fn find_team(&self, id: i64) -> StorageResult<Option<Team>> {
        (**self).find_team(id).await
    }

    async fn change_team(
        &self,
        member_id: i64,
        team_id: Option<i64>,
    ) -> StorageResult<Option<Member>> {
        (**self).change_team(member_id, team_id).await
    }
}
