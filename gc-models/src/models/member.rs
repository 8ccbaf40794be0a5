//! Member (service seeker) entity model.

use chrono::NaiveDateTime;
use serde::Serialize;
use rusqlite::{params, Connection, Row};
use gc_core::error::{GcError, GcResult};

use super::{audit_stamps, db_err, optional};

/// A registered member. Withdrawal flips `is_deleted`; the row is kept so
/// that estimates and reviews written by the member stay resolvable.
#[derive(Debug, Clone, Serialize)]
pub struct Member {
    pub id: Option<i64>,
    pub name: String,
    /// bcrypt hash, never serialized.
    #[serde(skip)]
    pub password: String,
    pub email: String,
    pub phone_number: String,
    pub is_deleted: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Member {
    pub fn new(name: &str, password_hash: &str, email: &str, phone_number: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            password: password_hash.to_string(),
            email: email.to_string(),
            phone_number: phone_number.to_string(),
            is_deleted: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Construct a Member from a database row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            password: row.get("password")?,
            email: row.get("email")?,
            phone_number: row.get("phone_number")?,
            is_deleted: row.get("is_deleted")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    // ─── Static finders ──────────────────────────────────────────────────

    /// Find a live member by ID.
    pub fn find_by_id(conn: &Connection, id: i64) -> GcResult<Option<Self>> {
        optional(conn.query_row(
            "SELECT * FROM members WHERE id = ?1 AND is_deleted = 0",
            [id],
            Self::from_row,
        ))
    }

    /// Find a live member by email address.
    pub fn find_by_email(conn: &Connection, email: &str) -> GcResult<Option<Self>> {
        optional(conn.query_row(
            "SELECT * FROM members WHERE email = ?1 AND is_deleted = 0",
            [email],
            Self::from_row,
        ))
    }

    pub fn exists_by_id(conn: &Connection, id: i64) -> GcResult<bool> {
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM members WHERE id = ?1 AND is_deleted = 0)",
            [id],
            |row| row.get(0),
        )
        .map_err(db_err)
    }

    pub fn exists_by_email(conn: &Connection, email: &str) -> GcResult<bool> {
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM members WHERE email = ?1 AND is_deleted = 0)",
            [email],
            |row| row.get(0),
        )
        .map_err(db_err)
    }

    /// Mark a member as withdrawn. Returns false if no live member matched.
    pub fn soft_delete(conn: &Connection, id: i64) -> GcResult<bool> {
        let changed = conn
            .execute(
                "UPDATE members SET is_deleted = 1, updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?1 AND is_deleted = 0",
                [id],
            )
            .map_err(db_err)?;
        Ok(changed > 0)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Insert this member. Returns the new database ID.
    pub fn save(&mut self, conn: &Connection) -> GcResult<i64> {
        conn.execute(
            "INSERT INTO members (name, password, email, phone_number, is_deleted)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![self.name, self.password, self.email, self.phone_number, self.is_deleted],
        )
        .map_err(db_err)?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        (self.created_at, self.updated_at) = audit_stamps(conn, "members", id)?;
        Ok(id)
    }

    /// Update profile fields on an existing member.
    pub fn update(&self, conn: &Connection) -> GcResult<()> {
        let id = self.id.ok_or_else(|| GcError::Database("member has no id for update".into()))?;
        conn.execute(
            "UPDATE members SET name = ?1, password = ?2, email = ?3, phone_number = ?4,
                updated_at = CURRENT_TIMESTAMP
             WHERE id = ?5",
            params![self.name, self.password, self.email, self.phone_number, id],
        )
        .map_err(db_err)?;
        Ok(())
    }
}
