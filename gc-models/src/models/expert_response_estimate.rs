//! Priced response from an expert to a member estimate.

use chrono::NaiveDateTime;
use serde::Serialize;
use rusqlite::{params, Connection, Row};
use gc_core::error::{GcError, GcResult};

use super::{audit_stamps, db_err, optional};

#[derive(Debug, Clone, Serialize)]
pub struct ExpertResponseEstimate {
    pub id: Option<i64>,
    pub expert_id: i64,
    pub member_estimate_id: i64,
    pub total_cost: i64,
    pub description: String,
    pub is_often_used: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl ExpertResponseEstimate {
    pub fn new(
        expert_id: i64,
        member_estimate_id: i64,
        total_cost: i64,
        description: &str,
        is_often_used: bool,
    ) -> Self {
        Self {
            id: None,
            expert_id,
            member_estimate_id,
            total_cost,
            description: description.to_string(),
            is_often_used,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            expert_id: row.get("expert_id")?,
            member_estimate_id: row.get("member_estimate_id")?,
            total_cost: row.get("total_cost")?,
            description: row.get("description")?,
            is_often_used: row.get("is_often_used")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    // ─── Static finders ──────────────────────────────────────────────────

    pub fn find_by_id(conn: &Connection, id: i64) -> GcResult<Option<Self>> {
        optional(conn.query_row(
            "SELECT * FROM expert_response_estimates WHERE id = ?1",
            [id],
            Self::from_row,
        ))
    }

    pub fn find_all(conn: &Connection) -> GcResult<Vec<Self>> {
        let mut stmt = conn
            .prepare("SELECT * FROM expert_response_estimates ORDER BY id")
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], Self::from_row)
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(rows)
    }

    pub fn delete(conn: &Connection, id: i64) -> GcResult<bool> {
        let changed = conn
            .execute("DELETE FROM expert_response_estimates WHERE id = ?1", [id])
            .map_err(db_err)?;
        Ok(changed > 0)
    }

    // ─── Mutation ────────────────────────────────────────────────────────

    /// Rewrite the priced fields. References are fixed at creation.
    pub fn apply_update(&mut self, total_cost: i64, description: &str, is_often_used: bool) {
        self.total_cost = total_cost;
        self.description = description.to_string();
        self.is_often_used = is_often_used;
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn save(&mut self, conn: &Connection) -> GcResult<i64> {
        conn.execute(
            "INSERT INTO expert_response_estimates (
                expert_id, member_estimate_id, total_cost, description, is_often_used
            ) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                self.expert_id,
                self.member_estimate_id,
                self.total_cost,
                self.description,
                self.is_often_used,
            ],
        )
        .map_err(db_err)?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        (self.created_at, self.updated_at) = audit_stamps(conn, "expert_response_estimates", id)?;
        Ok(id)
    }

    pub fn update(&self, conn: &Connection) -> GcResult<()> {
        let id = self
            .id
            .ok_or_else(|| GcError::Database("expert response estimate has no id for update".into()))?;
        conn.execute(
            "UPDATE expert_response_estimates SET
                total_cost = ?1, description = ?2, is_often_used = ?3,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?4",
            params![self.total_cost, self.description, self.is_often_used, id],
        )
        .map_err(db_err)?;
        Ok(())
    }
}
