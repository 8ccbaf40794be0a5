//! Database schema definitions and table creation.
//!
//! One table per aggregate. Audit columns (`created_at`, `updated_at`) are
//! filled by SQLite defaults and refreshed by each `update`. Soft-deletable
//! tables carry an explicit `is_deleted` flag.

use rusqlite::Connection;
use gc_core::error::{GcError, GcResult};
use tracing::info;

/// Create all database tables and indexes if they do not exist.
pub fn create_tables(conn: &Connection) -> GcResult<()> {
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| GcError::Database(format!("failed to create schema: {e}")))?;
    info!("database schema verified");
    Ok(())
}

/// Drop all tables (used for database reset). Children first.
pub fn drop_tables(conn: &Connection) -> GcResult<()> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS replies;
         DROP TABLE IF EXISTS reviews;
         DROP TABLE IF EXISTS buckets;
         DROP TABLE IF EXISTS expert_response_estimates;
         DROP TABLE IF EXISTS member_estimates;
         DROP TABLE IF EXISTS sub_items;
         DROP TABLE IF EXISTS main_items;
         DROP TABLE IF EXISTS experts;
         DROP TABLE IF EXISTS members;
         DROP TABLE IF EXISTS schema_version;",
    )
    .map_err(|e| GcError::Database(format!("failed to drop tables: {e}")))?;
    Ok(())
}

/// Tables reported by `Database::stats`, in dependency order.
pub const TABLES: &[&str] = &[
    "members",
    "experts",
    "main_items",
    "sub_items",
    "member_estimates",
    "expert_response_estimates",
    "buckets",
    "reviews",
    "replies",
];

/// Complete SQL schema for all tables.
const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

-- Members (service seekers)
CREATE TABLE IF NOT EXISTS members (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    name                TEXT NOT NULL,
    password            TEXT NOT NULL,
    email               TEXT NOT NULL,
    phone_number        TEXT NOT NULL,
    is_deleted          INTEGER NOT NULL DEFAULT 0,
    created_at          TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at          TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_members_email ON members(email);

-- Experts (service providers)
CREATE TABLE IF NOT EXISTS experts (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    store_name          TEXT NOT NULL UNIQUE,
    location            TEXT NOT NULL,
    distance            INTEGER NOT NULL,
    description         TEXT NOT NULL,
    created_at          TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at          TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

-- Category taxonomy
CREATE TABLE IF NOT EXISTS main_items (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    name                TEXT NOT NULL UNIQUE,
    description         TEXT NOT NULL,
    created_at          TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at          TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS sub_items (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    main_item_id        INTEGER NOT NULL REFERENCES main_items(id) ON DELETE CASCADE,
    name                TEXT NOT NULL,
    description         TEXT NOT NULL,
    created_at          TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at          TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (main_item_id, name)
);

CREATE INDEX IF NOT EXISTS idx_sub_items_main_item ON sub_items(main_item_id);

-- Estimates requested by members
CREATE TABLE IF NOT EXISTS member_estimates (
    id                      INTEGER PRIMARY KEY AUTOINCREMENT,
    member_id               INTEGER NOT NULL REFERENCES members(id),
    sub_item_id             INTEGER NOT NULL REFERENCES sub_items(id),
    location                TEXT NOT NULL,
    preferred_start_date    TEXT NOT NULL,
    detailed_description    TEXT NOT NULL DEFAULT '',
    created_at              TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at              TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_member_estimates_member ON member_estimates(member_id);

-- Priced responses from experts
CREATE TABLE IF NOT EXISTS expert_response_estimates (
    id                      INTEGER PRIMARY KEY AUTOINCREMENT,
    expert_id               INTEGER NOT NULL REFERENCES experts(id) ON DELETE CASCADE,
    member_estimate_id      INTEGER NOT NULL REFERENCES member_estimates(id) ON DELETE CASCADE,
    total_cost              INTEGER NOT NULL,
    description             TEXT NOT NULL,
    is_often_used           INTEGER NOT NULL DEFAULT 0,
    created_at              TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at              TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_expert_response_estimates_member_estimate
    ON expert_response_estimates(member_estimate_id);

-- Favorites: one per (expert, member) pair
CREATE TABLE IF NOT EXISTS buckets (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    expert_id           INTEGER NOT NULL REFERENCES experts(id) ON DELETE CASCADE,
    member_id           INTEGER NOT NULL REFERENCES members(id),
    created_at          TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at          TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (expert_id, member_id)
);

-- Reviews and expert replies
CREATE TABLE IF NOT EXISTS reviews (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    expert_id           INTEGER NOT NULL REFERENCES experts(id) ON DELETE CASCADE,
    writer_id           INTEGER NOT NULL REFERENCES members(id),
    sub_item_id         INTEGER NOT NULL REFERENCES sub_items(id),
    content             TEXT NOT NULL,
    rating              INTEGER NOT NULL,
    is_deleted          INTEGER NOT NULL DEFAULT 0,
    created_at          TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at          TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_reviews_expert ON reviews(expert_id, is_deleted);

CREATE TABLE IF NOT EXISTS replies (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    review_id           INTEGER NOT NULL REFERENCES reviews(id) ON DELETE CASCADE,
    content             TEXT NOT NULL,
    is_deleted          INTEGER NOT NULL DEFAULT 0,
    created_at          TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at          TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_replies_review ON replies(review_id, is_deleted);
"#;
