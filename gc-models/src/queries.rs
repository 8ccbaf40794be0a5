//! Query builders for access patterns that span more than one row lookup.
//!
//! Provides the filtered listings and joins the service layer needs:
//! estimates per member, responses per estimate, sub items per category,
//! reviews with their reply and per-expert rating summaries. All queries
//! use parameterized SQL and return domain model types.

use rusqlite::{params, Connection};
use gc_core::error::GcResult;

use crate::models::db_err;
use crate::models::expert_response_estimate::ExpertResponseEstimate;
use crate::models::item::SubItem;
use crate::models::member_estimate::MemberEstimate;
use crate::models::review::{Reply, Review};

// ─── Estimate Queries ───────────────────────────────────────────────────────

/// Estimates requested by one member, oldest first.
pub fn estimates_by_member(conn: &Connection, member_id: i64) -> GcResult<Vec<MemberEstimate>> {
    let mut stmt = conn
        .prepare("SELECT * FROM member_estimates WHERE member_id = ?1 ORDER BY id")
        .map_err(db_err)?;
    let rows = stmt
        .query_map([member_id], MemberEstimate::from_row)
        .map_err(db_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(db_err)?;
    Ok(rows)
}

/// Expert responses answering one member estimate, oldest first.
pub fn responses_by_member_estimate(
    conn: &Connection,
    member_estimate_id: i64,
) -> GcResult<Vec<ExpertResponseEstimate>> {
    let mut stmt = conn
        .prepare(
            "SELECT * FROM expert_response_estimates WHERE member_estimate_id = ?1 ORDER BY id",
        )
        .map_err(db_err)?;
    let rows = stmt
        .query_map([member_estimate_id], ExpertResponseEstimate::from_row)
        .map_err(db_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(db_err)?;
    Ok(rows)
}

// ─── Item Queries ───────────────────────────────────────────────────────────

pub fn sub_items_by_main_item(conn: &Connection, main_item_id: i64) -> GcResult<Vec<SubItem>> {
    let mut stmt = conn
        .prepare("SELECT * FROM sub_items WHERE main_item_id = ?1 ORDER BY id")
        .map_err(db_err)?;
    let rows = stmt
        .query_map([main_item_id], SubItem::from_row)
        .map_err(db_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(db_err)?;
    Ok(rows)
}

// ─── Review Queries ─────────────────────────────────────────────────────────

/// A live review joined with its live reply.
#[derive(Debug, Clone)]
pub struct ReviewWithReply {
    pub review: Review,
    pub reply: Option<Reply>,
}

/// Live reviews of one expert, newest first, each with its live reply.
pub fn reviews_with_reply_by_expert(conn: &Connection, expert_id: i64) -> GcResult<Vec<ReviewWithReply>> {
    let mut stmt = conn
        .prepare(
            "SELECT r.id, r.expert_id, r.writer_id, r.sub_item_id, r.content, r.rating,
                    r.created_at, r.updated_at,
                    p.id AS reply_id, p.content AS reply_content,
                    p.created_at AS reply_created_at, p.updated_at AS reply_updated_at
             FROM reviews r
             LEFT JOIN replies p ON p.review_id = r.id AND p.is_deleted = 0
             WHERE r.expert_id = ?1 AND r.is_deleted = 0
             ORDER BY r.id DESC",
        )
        .map_err(db_err)?;

    let rows = stmt
        .query_map(params![expert_id], |row| {
            let review_id: i64 = row.get("id")?;
            let review = Review {
                id: Some(review_id),
                expert_id: row.get("expert_id")?,
                writer_id: row.get("writer_id")?,
                sub_item_id: row.get("sub_item_id")?,
                content: row.get("content")?,
                rating: row.get("rating")?,
                is_deleted: false,
                created_at: row.get("created_at")?,
                updated_at: row.get("updated_at")?,
            };
            let reply_id: Option<i64> = row.get("reply_id")?;
            let reply = match reply_id {
                Some(id) => Some(Reply {
                    id: Some(id),
                    review_id,
                    content: row.get("reply_content")?,
                    is_deleted: false,
                    created_at: row.get("reply_created_at")?,
                    updated_at: row.get("reply_updated_at")?,
                }),
                None => None,
            };
            Ok(ReviewWithReply { review, reply })
        })
        .map_err(db_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(db_err)?;
    Ok(rows)
}

/// Aggregate of an expert's live reviews.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub review_count: i64,
    /// Mean rating, 0.0 when there are no reviews.
    pub average_rating: f64,
}

pub fn expert_rating_summary(conn: &Connection, expert_id: i64) -> GcResult<RatingSummary> {
    conn.query_row(
        "SELECT COUNT(*), COALESCE(AVG(rating), 0.0)
         FROM reviews WHERE expert_id = ?1 AND is_deleted = 0",
        [expert_id],
        |row| {
            Ok(RatingSummary {
                review_count: row.get(0)?,
                average_rating: row.get(1)?,
            })
        },
    )
    .map_err(db_err)
}
