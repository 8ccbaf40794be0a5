//! Two-level category taxonomy: main items and their sub items.

use chrono::NaiveDateTime;
use serde::Serialize;
use rusqlite::{params, Connection, Row};
use gc_core::error::{ErrorCode, GcError, GcResult};

use super::{audit_stamps, db_err, optional, unique_err};

/// Top-level service category, e.g. "레슨".
#[derive(Debug, Clone, Serialize)]
pub struct MainItem {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Concrete service under a main item, e.g. "피아노 레슨".
#[derive(Debug, Clone, Serialize)]
pub struct SubItem {
    pub id: Option<i64>,
    pub main_item_id: i64,
    pub name: String,
    pub description: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl MainItem {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            description: description.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    // ─── Static finders ──────────────────────────────────────────────────

    pub fn find_by_id(conn: &Connection, id: i64) -> GcResult<Option<Self>> {
        optional(conn.query_row("SELECT * FROM main_items WHERE id = ?1", [id], Self::from_row))
    }

    pub fn find_all(conn: &Connection) -> GcResult<Vec<Self>> {
        let mut stmt = conn
            .prepare("SELECT * FROM main_items ORDER BY id")
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
            "SELECT EXISTS(SELECT 1 FROM main_items WHERE id = ?1)",
            [id],
            |row| row.get(0),
        )
        .map_err(db_err)
    }

    pub fn exists_by_name(conn: &Connection, name: &str, except_id: Option<i64>) -> GcResult<bool> {
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM main_items WHERE name = ?1 AND id != ?2)",
            params![name, except_id.unwrap_or(-1)],
            |row| row.get(0),
        )
        .map_err(db_err)
    }

    /// Delete a main item together with its sub items.
    pub fn delete(conn: &Connection, id: i64) -> GcResult<bool> {
        let changed = conn
            .execute("DELETE FROM main_items WHERE id = ?1", [id])
            .map_err(db_err)?;
        Ok(changed > 0)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn save(&mut self, conn: &Connection) -> GcResult<i64> {
        conn.execute(
            "INSERT INTO main_items (name, description) VALUES (?1, ?2)",
            params![self.name, self.description],
        )
        .map_err(unique_err(ErrorCode::DuplicatedMainItemName))?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        (self.created_at, self.updated_at) = audit_stamps(conn, "main_items", id)?;
        Ok(id)
    }

    pub fn update(&self, conn: &Connection) -> GcResult<()> {
        let id = self.id.ok_or_else(|| GcError::Database("main item has no id for update".into()))?;
        conn.execute(
            "UPDATE main_items SET name = ?1, description = ?2, updated_at = CURRENT_TIMESTAMP
             WHERE id = ?3",
            params![self.name, self.description, id],
        )
        .map_err(unique_err(ErrorCode::DuplicatedMainItemName))?;
        Ok(())
    }
}

impl SubItem {
    pub fn new(main_item_id: i64, name: &str, description: &str) -> Self {
        Self {
            id: None,
            main_item_id,
            name: name.to_string(),
            description: description.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            main_item_id: row.get("main_item_id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    // ─── Static finders ──────────────────────────────────────────────────

    pub fn find_by_id(conn: &Connection, id: i64) -> GcResult<Option<Self>> {
        optional(conn.query_row("SELECT * FROM sub_items WHERE id = ?1", [id], Self::from_row))
    }

    pub fn find_all(conn: &Connection) -> GcResult<Vec<Self>> {
        let mut stmt = conn
            .prepare("SELECT * FROM sub_items ORDER BY id")
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
            "SELECT EXISTS(SELECT 1 FROM sub_items WHERE id = ?1)",
            [id],
            |row| row.get(0),
        )
        .map_err(db_err)
    }

    /// Names are unique per main item, not globally.
    pub fn exists_by_name(
        conn: &Connection,
        main_item_id: i64,
        name: &str,
        except_id: Option<i64>,
    ) -> GcResult<bool> {
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sub_items
                           WHERE main_item_id = ?1 AND name = ?2 AND id != ?3)",
            params![main_item_id, name, except_id.unwrap_or(-1)],
            |row| row.get(0),
        )
        .map_err(db_err)
    }

    pub fn delete(conn: &Connection, id: i64) -> GcResult<bool> {
        let changed = conn
            .execute("DELETE FROM sub_items WHERE id = ?1", [id])
            .map_err(db_err)?;
        Ok(changed > 0)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn save(&mut self, conn: &Connection) -> GcResult<i64> {
        conn.execute(
            "INSERT INTO sub_items (main_item_id, name, description) VALUES (?1, ?2, ?3)",
            params![self.main_item_id, self.name, self.description],
        )
        .map_err(unique_err(ErrorCode::DuplicatedSubItemName))?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        (self.created_at, self.updated_at) = audit_stamps(conn, "sub_items", id)?;
        Ok(id)
    }

    pub fn update(&self, conn: &Connection) -> GcResult<()> {
        let id = self.id.ok_or_else(|| GcError::Database("sub item has no id for update".into()))?;
        conn.execute(
            "UPDATE sub_items SET main_item_id = ?1, name = ?2, description = ?3,
                updated_at = CURRENT_TIMESTAMP
             WHERE id = ?4",
            params![self.main_item_id, self.name, self.description, id],
        )
        .map_err(unique_err(ErrorCode::DuplicatedSubItemName))?;
        Ok(())
    }
}
