//! Domain entities: members and the teams they belong to.

use serde::{Deserialize, Serialize};

use crate::error::QueryResult;

use super::row::{FromRow, Row};

/// A team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Surrogate key.
    pub id: i64,
    /// Team name.
    pub name: String,
}

impl Team {
    /// Number of columns a team occupies in an entity projection.
    pub const WIDTH: usize = 2;

    /// Decodes a team from the `Team::WIDTH` cells starting at `offset`.
    pub fn from_row_at(row: &Row, offset: usize) -> QueryResult<Self> {
        Ok(Self {
            id: row.get(offset)?,
            name: row.get(offset + 1)?,
        })
    }

    /// Decodes a team that may be absent (outer join miss).
    pub fn optional_from_row_at(row: &Row, offset: usize) -> QueryResult<Option<Self>> {
        match row.get::<Option<i64>>(offset)? {
            Some(_) => Self::from_row_at(row, offset).map(Some),
            None => Ok(None),
        }
    }
}

impl FromRow for Team {
    fn from_row(row: &Row) -> QueryResult<Self> {
        Self::from_row_at(row, 0)
    }
}

/// A member, optionally assigned to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Surrogate key.
    pub id: i64,
    /// Login name. Nullable in storage.
    pub username: Option<String>,
    /// Age in years.
    pub age: i32,
    /// Owning team.
    pub team_id: Option<i64>,
}

impl Member {
    /// Number of columns a member occupies in an entity projection.
    pub const WIDTH: usize = 4;

    /// Decodes a member from the `Member::WIDTH` cells starting at `offset`.
    pub fn from_row_at(row: &Row, offset: usize) -> QueryResult<Self> {
        Ok(Self {
            id: row.get(offset)?,
            username: row.get(offset + 1)?,
            age: row.get(offset + 2)?,
            team_id: row.get(offset + 3)?,
        })
    }
}

impl FromRow for Member {
    fn from_row(row: &Row) -> QueryResult<Self> {
        Self::from_row_at(row, 0)
    }
}

impl FromRow for (Member, Option<Team>) {
    fn from_row(row: &Row) -> QueryResult<Self> {
        Ok((
            Member::from_row_at(row, 0)?,
            Team::optional_from_row_at(row, Member::WIDTH)?,
        ))
    }
}

/// A team that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeam {
    /// Team name.
    pub name: String,
}

impl NewTeam {
    /// Creates a new team with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A member that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewMember {
    /// Login name.
    pub username: Option<String>,
    /// Age in years.
    pub age: i32,
    /// Owning team.
    pub team_id: Option<i64>,
}

impl NewMember {
    /// Creates a team-less member.
    pub fn new(username: impl Into<String>, age: i32) -> Self {
        Self {
            username: Some(username.into()),
            age,
            team_id: None,
        }
    }

    /// Creates a member without a username.
    pub fn anonymous(age: i32) -> Self {
        Self {
            username: None,
            age,
            team_id: None,
        }
    }

    /// Assigns the member to a team.
    pub fn with_team(mut self, team: &Team) -> Self {
        self.team_id = Some(team.id);
        self
    }
}
