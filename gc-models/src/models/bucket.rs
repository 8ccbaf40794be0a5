//! Bucket: a member's favorite expert.

use chrono::NaiveDateTime;
use serde::Serialize;
use rusqlite::{params, Connection, Row};
use gc_core::error::{ErrorCode, GcResult};

use super::{audit_stamps, db_err, optional, unique_err};

/// At most one bucket exists per (expert, member) pair.
#[derive(Debug, Clone, Serialize)]
pub struct Bucket {
    pub id: Option<i64>,
    pub expert_id: i64,
    pub member_id: i64,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Bucket {
    pub fn new(expert_id: i64, member_id: i64) -> Self {
        Self {
            id: None,
            expert_id,
            member_id,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            expert_id: row.get("expert_id")?,
            member_id: row.get("member_id")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> GcResult<Option<Self>> {
        optional(conn.query_row("SELECT * FROM buckets WHERE id = ?1", [id], Self::from_row))
    }

    pub fn find_all(conn: &Connection) -> GcResult<Vec<Self>> {
        let mut stmt = conn
            .prepare("SELECT * FROM buckets ORDER BY id")
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], Self::from_row)
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(rows)
    }

    pub fn exists_by_pair(conn: &Connection, expert_id: i64, member_id: i64) -> GcResult<bool> {
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM buckets WHERE expert_id = ?1 AND member_id = ?2)",
            params![expert_id, member_id],
            |row| row.get(0),
        )
        .map_err(db_err)
    }

    pub fn delete(conn: &Connection, id: i64) -> GcResult<bool> {
        let changed = conn
            .execute("DELETE FROM buckets WHERE id = ?1", [id])
            .map_err(db_err)?;
        Ok(changed > 0)
    }

    pub fn save(&mut self, conn: &Connection) -> GcResult<i64> {
        conn.execute(
            "INSERT INTO buckets (expert_id, member_id) VALUES (?1, ?2)",
            params![self.expert_id, self.member_id],
        )
        .map_err(unique_err(ErrorCode::DuplicatedBucket))?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        (self.created_at, self.updated_at) = audit_stamps(conn, "buckets", id)?;
        Ok(id)
    }
}
