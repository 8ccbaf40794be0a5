//! Versioned database migrations.
//!
//! Migrations run sequentially from the current stored version to the latest.
//! Each migration is idempotent.

use rusqlite::{params, Connection};
use tracing::{info, warn};
use gc_core::error::{GcError, GcResult};
use gc_core::constants::DB_SCHEMA_VERSION;

/// Run all pending migrations on the database.
pub fn run_migrations(conn: &Connection) -> GcResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version >= DB_SCHEMA_VERSION {
        info!("database schema is up to date (version {current_version})");
        return Ok(());
    }

    info!("running migrations from version {current_version} to {DB_SCHEMA_VERSION}");

    for version in (current_version + 1)..=DB_SCHEMA_VERSION {
        run_migration(conn, version)?;
    }

    set_schema_version(conn, DB_SCHEMA_VERSION)?;
    info!("migrations complete, schema at version {DB_SCHEMA_VERSION}");
    Ok(())
}

/// Get the current schema version from the database.
pub fn get_schema_version(conn: &Connection) -> GcResult<i32> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .map_err(|e| GcError::Migration(e.to_string()))?;

    if count == 0 {
        conn.execute("INSERT INTO schema_version (version) VALUES (0)", [])
            .map_err(|e| GcError::Migration(e.to_string()))?;
        return Ok(0);
    }

    conn.query_row("SELECT version FROM schema_version LIMIT 1", [], |row| row.get(0))
        .map_err(|e| GcError::Migration(e.to_string()))
}

fn set_schema_version(conn: &Connection, version: i32) -> GcResult<()> {
    conn.execute("UPDATE schema_version SET version = ?1", [version])
        .map_err(|e| GcError::Migration(e.to_string()))?;
    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> GcResult<()> {
    info!("applying migration version {version}");

    match version {
        1 => migration_v1(conn),
        _ => {
            warn!("unknown migration version {version}, skipping");
            Ok(())
        }
    }
}

/// Migration v1: tables come from `schema::create_tables`; this seeds the
/// default category taxonomy when the catalogue is empty.
fn migration_v1(conn: &Connection) -> GcResult<()> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM main_items", [], |row| row.get(0))
        .map_err(|e| GcError::Migration(e.to_string()))?;

    if count > 0 {
        return Ok(());
    }

    for (main_name, main_description, subs) in DEFAULT_CATEGORIES {
        conn.execute(
            "INSERT INTO main_items (name, description) VALUES (?1, ?2)",
            params![main_name, main_description],
        )
        .map_err(|e| GcError::Migration(e.to_string()))?;
        let main_id = conn.last_insert_rowid();

        for (sub_name, sub_description) in *subs {
            conn.execute(
                "INSERT INTO sub_items (main_item_id, name, description) VALUES (?1, ?2, ?3)",
                params![main_id, sub_name, sub_description],
            )
            .map_err(|e| GcError::Migration(e.to_string()))?;
        }
    }

    info!("seeded {} default main items", DEFAULT_CATEGORIES.len());
    Ok(())
}

type Category = (&'static str, &'static str, &'static [(&'static str, &'static str)]);

/// Default taxonomy: (main name, description, [(sub name, description)]).
pub const DEFAULT_CATEGORIES: &[Category] = &[
    (
        "레슨",
        "운동, 음악, 외국어 등 개인 레슨 서비스",
        &[
            ("피아노 레슨", "초보자부터 전공 준비까지 피아노 개인 레슨"),
            ("영어 회화", "원어민 수준의 영어 회화 수업"),
        ],
    ),
    (
        "홈리빙",
        "청소, 이사, 인테리어 등 생활 서비스",
        &[
            ("입주 청소", "새 집 입주 전 전문 청소 서비스"),
            ("이사 견적", "가정 이사 및 사무실 이전 서비스"),
        ],
    ),
    (
        "이벤트",
        "촬영, 행사 진행 등 이벤트 관련 서비스",
        &[
            ("웨딩 촬영", "본식 및 스냅 촬영 서비스"),
            ("행사 사회자", "기업 행사와 결혼식 사회 진행"),
        ],
    ),
];
