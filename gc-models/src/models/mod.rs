//! Entity model definitions.

pub mod member;
pub mod expert;
pub mod item;
pub mod member_estimate;
pub mod expert_response_estimate;
pub mod bucket;
pub mod review;

use chrono::NaiveDateTime;
use rusqlite::Connection;
use gc_core::error::{ErrorCode, GcError, GcResult};

/// Map a single-row lookup into `Option`, treating "no rows" as absence.
pub(crate) fn optional<T>(result: rusqlite::Result<T>) -> GcResult<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(GcError::Database(e.to_string())),
    }
}

/// Convert a rusqlite error into the workspace error type.
pub(crate) fn db_err(e: rusqlite::Error) -> GcError {
    GcError::Database(e.to_string())
}

/// Like `db_err`, but reports a unique-constraint violation as `Duplicated(code)`.
pub(crate) fn unique_err(code: ErrorCode) -> impl Fn(rusqlite::Error) -> GcError {
    move |e| {
        if let rusqlite::Error::SqliteFailure(failure, _) = &e {
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
                return GcError::Duplicated(code);
            }
        }
        db_err(e)
    }
}

/// `created_at` / `updated_at` as the database stamped them for row `id`.
pub(crate) fn audit_stamps(
    conn: &Connection,
    table: &str,
    id: i64,
) -> GcResult<(Option<NaiveDateTime>, Option<NaiveDateTime>)> {
    conn.query_row(
        &format!("SELECT created_at, updated_at FROM {table} WHERE id = ?1"),
        [id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .map_err(db_err)
}

/// In-memory connection with schema and seed data, for model tests.
#[cfg(test)]
pub(crate) fn test_conn() -> rusqlite::Connection {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys=ON;").unwrap();
    crate::schema::create_tables(&conn).unwrap();
    crate::migrations::run_migrations(&conn).unwrap();
    conn
}
