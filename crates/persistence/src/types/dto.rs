//! Flat projections of queried fields.

use serde::{Deserialize, Serialize};

use crate::error::QueryResult;

use super::row::{FromRow, Row};

/// Member search result: a member flattened together with its team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamDto {
    /// Member key.
    pub member_id: i64,
    /// Member login name.
    pub username: Option<String>,
    /// Member age.
    pub age: i32,
    /// Team key; `None` for members without a team.
    pub team_id: Option<i64>,
    /// Team name; `None` for members without a team.
    pub team_name: Option<String>,
}

impl FromRow for MemberTeamDto {
    fn from_row(row: &Row) -> QueryResult<Self> {
        Ok(Self {
            member_id: row.get(0)?,
            username: row.get(1)?,
            age: row.get(2)?,
            team_id: row.get(3)?,
            team_name: row.get(4)?,
        })
    }
}

/// Username and age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDto {
    /// Login name.
    pub username: Option<String>,
    /// Age in years.
    pub age: i32,
}

impl MemberDto {
    /// Creates a DTO.
    pub fn new(username: impl Into<String>, age: i32) -> Self {
        Self {
            username: Some(username.into()),
            age,
        }
    }
}

impl FromRow for MemberDto {
    fn from_row(row: &Row) -> QueryResult<Self> {
        Ok(Self {
            username: row.get(0)?,
            age: row.get(1)?,
        })
    }
}

/// Same shape as [`MemberDto`] but with differently named fields; filled by
/// label, so the username column has to be projected as `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    /// Login name, read from the `name` column.
    pub name: Option<String>,
    /// Age in years.
    pub age: i32,
}

impl FromRow for UserDto {
    fn from_row(row: &Row) -> QueryResult<Self> {
        Ok(Self {
            name: row.get_named("name")?,
            age: row.get_named("age")?,
        })
    }
}
