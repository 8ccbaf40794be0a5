//! Expert (service provider) entity model.

use chrono::NaiveDateTime;
use serde::Serialize;
use rusqlite::{params, Connection, Row};
use gc_core::error::{ErrorCode, GcError, GcResult};

use super::{audit_stamps, db_err, optional, unique_err};

#[derive(Debug, Clone, Serialize)]
pub struct Expert {
    pub id: Option<i64>,
    pub store_name: String,
    pub location: String,
    /// Service radius in kilometres.
    pub distance: i64,
    pub description: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Expert {
    pub fn new(store_name: &str, location: &str, distance: i64, description: &str) -> Self {
        Self {
            id: None,
            store_name: store_name.to_string(),
            location: location.to_string(),
            distance,
            description: description.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            store_name: row.get("store_name")?,
            location: row.get("location")?,
            distance: row.get("distance")?,
            description: row.get("description")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    // ─── Static finders ──────────────────────────────────────────────────

    pub fn find_by_id(conn: &Connection, id: i64) -> GcResult<Option<Self>> {
        optional(conn.query_row("SELECT * FROM experts WHERE id = ?1", [id], Self::from_row))
    }

    /// All experts ordered by ID.
    pub fn find_all(conn: &Connection) -> GcResult<Vec<Self>> {
        let mut stmt = conn
            .prepare("SELECT * FROM experts ORDER BY id")
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
            "SELECT EXISTS(SELECT 1 FROM experts WHERE id = ?1)",
            [id],
            |row| row.get(0),
        )
        .map_err(db_err)
    }

    /// Whether another expert already uses `store_name`. `except_id` excludes
    /// the expert being updated.
    pub fn exists_by_store_name(conn: &Connection, store_name: &str, except_id: Option<i64>) -> GcResult<bool> {
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM experts WHERE store_name = ?1 AND id != ?2)",
            params![store_name, except_id.unwrap_or(-1)],
            |row| row.get(0),
        )
        .map_err(db_err)
    }

    /// Delete an expert. Buckets, reviews and responses go with it.
    pub fn delete(conn: &Connection, id: i64) -> GcResult<bool> {
        let changed = conn
            .execute("DELETE FROM experts WHERE id = ?1", [id])
            .map_err(db_err)?;
        Ok(changed > 0)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn save(&mut self, conn: &Connection) -> GcResult<i64> {
        conn.execute(
            "INSERT INTO experts (store_name, location, distance, description)
             VALUES (?1, ?2, ?3, ?4)",
            params![self.store_name, self.location, self.distance, self.description],
        )
        .map_err(unique_err(ErrorCode::DuplicatedExpertStoreName))?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        (self.created_at, self.updated_at) = audit_stamps(conn, "experts", id)?;
        Ok(id)
    }

    pub fn update(&self, conn: &Connection) -> GcResult<()> {
        let id = self.id.ok_or_else(|| GcError::Database("expert has no id for update".into()))?;
        conn.execute(
            "UPDATE experts SET store_name = ?1, location = ?2, distance = ?3, description = ?4,
                updated_at = CURRENT_TIMESTAMP
             WHERE id = ?5",
            params![self.store_name, self.location, self.distance, self.description, id],
        )
        .map_err(unique_err(ErrorCode::DuplicatedExpertStoreName))?;
        Ok(())
    }
}
