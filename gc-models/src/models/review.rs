//! Reviews of experts and the expert's reply to each review.
//!
//! Both are soft deleted: finders only ever return rows with
//! `is_deleted = 0`, and deletion flips the flag instead of removing the row.

use chrono::NaiveDateTime;
use serde::Serialize;
use rusqlite::{params, Connection, Row};
use gc_core::error::{GcError, GcResult};

use super::{audit_stamps, db_err, optional};

#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: Option<i64>,
    pub expert_id: i64,
    pub writer_id: i64,
    pub sub_item_id: i64,
    pub content: String,
    pub rating: i64,
    pub is_deleted: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub id: Option<i64>,
    pub review_id: i64,
    pub content: String,
    pub is_deleted: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Review {
    pub fn new(expert_id: i64, writer_id: i64, sub_item_id: i64, content: &str, rating: i64) -> Self {
        Self {
            id: None,
            expert_id,
            writer_id,
            sub_item_id,
            content: content.to_string(),
            rating,
            is_deleted: false,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            expert_id: row.get("expert_id")?,
            writer_id: row.get("writer_id")?,
            sub_item_id: row.get("sub_item_id")?,
            content: row.get("content")?,
            rating: row.get("rating")?,
            is_deleted: row.get("is_deleted")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    // ─── Static finders ──────────────────────────────────────────────────

    pub fn find_by_id(conn: &Connection, id: i64) -> GcResult<Option<Self>> {
        optional(conn.query_row(
            "SELECT * FROM reviews WHERE id = ?1 AND is_deleted = 0",
            [id],
            Self::from_row,
        ))
    }

    /// Live reviews of one expert, newest first.
    pub fn find_all_by_expert(conn: &Connection, expert_id: i64) -> GcResult<Vec<Self>> {
        let mut stmt = conn
            .prepare(
                "SELECT * FROM reviews WHERE expert_id = ?1 AND is_deleted = 0
                 ORDER BY id DESC",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map([expert_id], Self::from_row)
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(rows)
    }

    /// Soft-delete a review and its reply. Returns false if nothing live matched.
    pub fn soft_delete(conn: &Connection, id: i64) -> GcResult<bool> {
        let changed = conn
            .execute(
                "UPDATE reviews SET is_deleted = 1, updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?1 AND is_deleted = 0",
                [id],
            )
            .map_err(db_err)?;
        if changed > 0 {
            conn.execute(
                "UPDATE replies SET is_deleted = 1, updated_at = CURRENT_TIMESTAMP
                 WHERE review_id = ?1 AND is_deleted = 0",
                [id],
            )
            .map_err(db_err)?;
        }
        Ok(changed > 0)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn save(&mut self, conn: &Connection) -> GcResult<i64> {
        conn.execute(
            "INSERT INTO reviews (expert_id, writer_id, sub_item_id, content, rating, is_deleted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                self.expert_id,
                self.writer_id,
                self.sub_item_id,
                self.content,
                self.rating,
                self.is_deleted,
            ],
        )
        .map_err(db_err)?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        (self.created_at, self.updated_at) = audit_stamps(conn, "reviews", id)?;
        Ok(id)
    }

    /// Rewrite content and rating.
    pub fn update(&self, conn: &Connection) -> GcResult<()> {
        let id = self.id.ok_or_else(|| GcError::Database("review has no id for update".into()))?;
        conn.execute(
            "UPDATE reviews SET content = ?1, rating = ?2, updated_at = CURRENT_TIMESTAMP
             WHERE id = ?3",
            params![self.content, self.rating, id],
        )
        .map_err(db_err)?;
        Ok(())
    }
}

impl Reply {
    pub fn new(review_id: i64, content: &str) -> Self {
        Self {
            id: None,
            review_id,
            content: content.to_string(),
            is_deleted: false,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            review_id: row.get("review_id")?,
            content: row.get("content")?,
            is_deleted: row.get("is_deleted")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> GcResult<Option<Self>> {
        optional(conn.query_row(
            "SELECT * FROM replies WHERE id = ?1 AND is_deleted = 0",
            [id],
            Self::from_row,
        ))
    }

    /// The live reply to a review, if any.
    pub fn find_by_review(conn: &Connection, review_id: i64) -> GcResult<Option<Self>> {
        optional(conn.query_row(
            "SELECT * FROM replies WHERE review_id = ?1 AND is_deleted = 0
             ORDER BY id DESC LIMIT 1",
            [review_id],
            Self::from_row,
        ))
    }

    pub fn soft_delete(conn: &Connection, id: i64) -> GcResult<bool> {
        let changed = conn
            .execute(
                "UPDATE replies SET is_deleted = 1, updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?1 AND is_deleted = 0",
                [id],
            )
            .map_err(db_err)?;
        Ok(changed > 0)
    }

    pub fn save(&mut self, conn: &Connection) -> GcResult<i64> {
        conn.execute(
            "INSERT INTO replies (review_id, content, is_deleted) VALUES (?1, ?2, ?3)",
            params![self.review_id, self.content, self.is_deleted],
        )
        .map_err(db_err)?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        (self.created_at, self.updated_at) = audit_stamps(conn, "replies", id)?;
        Ok(id)
    }

    pub fn update(&self, conn: &Connection) -> GcResult<()> {
        let id = self.id.ok_or_else(|| GcError::Database("reply has no id for update".into()))?;
        conn.execute(
            "UPDATE replies SET content = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2",
            params![self.content, id],
        )
        .map_err(db_err)?;
        Ok(())
    }
}
