//! Estimate requested by a member for a sub item.

use chrono::NaiveDateTime;
use serde::Serialize;
use rusqlite::{params, Connection, Row};
use gc_core::error::GcResult;

use super::{audit_stamps, db_err, optional};

/// A member's request for quotes. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct MemberEstimate {
    pub id: Option<i64>,
    pub member_id: i64,
    pub sub_item_id: i64,
    pub location: String,
    pub preferred_start_date: NaiveDateTime,
    pub detailed_description: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl MemberEstimate {
    pub fn new(
        member_id: i64,
        sub_item_id: i64,
        location: &str,
        preferred_start_date: NaiveDateTime,
        detailed_description: &str,
    ) -> Self {
        Self {
            id: None,
            member_id,
            sub_item_id,
            location: location.to_string(),
            preferred_start_date,
            detailed_description: detailed_description.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            member_id: row.get("member_id")?,
            sub_item_id: row.get("sub_item_id")?,
            location: row.get("location")?,
            preferred_start_date: row.get("preferred_start_date")?,
            detailed_description: row.get("detailed_description")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    // ─── Static finders ──────────────────────────────────────────────────

    pub fn find_by_id(conn: &Connection, id: i64) -> GcResult<Option<Self>> {
        optional(conn.query_row(
            "SELECT * FROM member_estimates WHERE id = ?1",
            [id],
            Self::from_row,
        ))
    }

    pub fn find_all(conn: &Connection) -> GcResult<Vec<Self>> {
        let mut stmt = conn
            .prepare("SELECT * FROM member_estimates ORDER BY id")
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], Self::from_row)
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(rows)
    }

    pub fn exists_by_id(conn: &Connection, id: i64) -> GcResult<bool> {
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM member_estimates WHERE id = ?1)",
            [id],
            |row| row.get(0),
        )
        .map_err(db_err)
    }

    /// Hard delete. Expert responses to this estimate are removed by cascade.
    pub fn delete(conn: &Connection, id: i64) -> GcResult<bool> {
        let changed = conn
            .execute("DELETE FROM member_estimates WHERE id = ?1", [id])
            .map_err(db_err)?;
        Ok(changed > 0)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn save(&mut self, conn: &Connection) -> GcResult<i64> {
        conn.execute(
            "INSERT INTO member_estimates (
                member_id, sub_item_id, location, preferred_start_date, detailed_description
            ) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                self.member_id,
                self.sub_item_id,
                self.location,
                self.preferred_start_date,
                self.detailed_description,
            ],
        )
        .map_err(db_err)?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        (self.created_at, self.updated_at) = audit_stamps(conn, "member_estimates", id)?;
        Ok(id)
    }
}
