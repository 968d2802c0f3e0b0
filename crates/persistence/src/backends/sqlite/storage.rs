//! EntityStorage implementation for SQLite.

use async_trait::async_trait;
use rusqlite::{OptionalExtension, params};

use crate::core::EntityStorage;
use crate::error::StorageResult;
use crate::types::{Member, NewMember, NewTeam, Team};

use super::SqliteBackend;
use super::backend::internal_error;

const MEMBER_COLUMNS: &str = "id, username, age, team_id";

fn member_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Member> {
    Ok(Member {
        id: row.get(0)?,
        username: row.get(1)?,
        age: row.get(2)?,
        team_id: row.get(3)?,
    })
}

impl SqliteBackend {
    fn read_member(&self, conn: &rusqlite::Connection, id: i64) -> StorageResult<Option<Member>> {
        conn.query_row(
            &format!("SELECT {} FROM member WHERE id = ?1", MEMBER_COLUMNS),
            params![id],
            member_from_row,
        )
        .optional()
        .map_err(|e| internal_error(format!("Failed to read member {}: {}", id, e)))
    }
}

#[async_trait]
impl EntityStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn save_team(&self, team: NewTeam) -> StorageResult<Team> {
        let conn = self.get_connection()?;
        conn.execute("INSERT INTO team (name) VALUES (?1)", params![team.name])
            .map_err(|e| internal_error(format!("Failed to insert team: {}", e)))?;

        let id = conn.last_insert_rowid();
        tracing::debug!(id, name = %team.name, "Saved team");
        Ok(Team {
            id,
            name: team.name,
        })
    }

    async fn save_member(&self, member: NewMember) -> StorageResult<Member> {
        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO member (username, age, team_id) VALUES (?1, ?2, ?3)",
            params![member.username, member.age, member.team_id],
        )
        .map_err(|e| internal_error(format!("Failed to insert member: {}", e)))?;

        let id = conn.last_insert_rowid();
        tracing::debug!(id, username = ?member.username, "Saved member");
        Ok(Member {
            id,
            username: member.username,
            age: member.age,
            team_id: member.team_id,
        })
    }

    async fn find_member(&self, id: i64) -> StorageResult<Option<Member>> {
        let conn = self.get_connection()?;
        self.read_member(&conn, id)
    }

    async fn find_team(&self, id: i64) -> StorageResult<Option<Team>> {
        let conn = self.get_connection()?;
        conn.query_row(
            "SELECT id, name FROM team WHERE id = ?1",
            params![id],
            |row| {
                Ok(Team {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(|e| internal_error(format!("Failed to read team {}: {}", id, e)))
    }

    async fn change_team(
        &self,
        member_id: i64,
        team_id: Option<i64>,
    ) -> StorageResult<Option<Member>> {
        let conn = self.get_connection()?;
        let changed = conn
            .execute(
                "UPDATE member SET team_id = ?1 WHERE id = ?2",
                params![team_id, member_id],
            )
            .map_err(|e| internal_error(format!("Failed to change team: {}", e)))?;

        if changed == 0 {
            return Ok(None);
        }
        self.read_member(&conn, member_id)
    }
}
