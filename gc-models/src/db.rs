//! Database initialization, connection pooling, and lifecycle management.
//!
//! Uses SQLite in WAL mode with r2d2 connection pooling.
//! Runs integrity checks on startup and applies versioned migrations.

use std::path::Path;
use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::{info, warn, error};

use gc_core::error::{GcError, GcResult};
use gc_core::config::DatabaseConfig;

use crate::schema;
use crate::migrations;

/// Type alias for the SQLite connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Database wrapper providing initialization, pooling, and lifecycle management.
#[derive(Clone)]
pub struct Database {
    pool: Arc<DbPool>,
}

impl Database {
    /// Initialize the database at the given path with the provided configuration.
    ///
    /// This:
    /// 1. Creates the database file and parent directories if needed
    /// 2. Sets up connection pooling with per-connection PRAGMAs
    /// 3. Runs an integrity check if configured
    /// 4. Creates the schema tables
    /// 5. Runs pending migrations
    pub fn init(db_path: &Path, config: &DatabaseConfig) -> GcResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!("initializing database at {}", db_path.display());

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(config.pool_size.max(1))
            .connection_customizer(Box::new(ConnectionCustomizer {
                wal_mode: config.wal_mode,
            }))
            .build(manager)
            .map_err(|e| GcError::Pool(e.to_string()))?;

        let db = Self {
            pool: Arc::new(pool),
        };

        if config.integrity_check_on_startup {
            db.run_integrity_check()?;
        }

        {
            let conn = db.conn()?;
            schema::create_tables(&conn)?;
            migrations::run_migrations(&conn)?;
        }

        info!("database initialized successfully");
        Ok(db)
    }

    /// Get a connection from the pool.
    pub fn conn(&self) -> GcResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| GcError::Pool(e.to_string()))
    }

    /// Run a SQLite integrity check.
    pub fn run_integrity_check(&self) -> GcResult<()> {
        let conn = self.conn()?;
        let result: String = conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))
            .map_err(|e| GcError::Database(e.to_string()))?;

        if result != "ok" {
            error!("database integrity check failed: {result}");
            return Err(GcError::IntegrityCheck(result));
        }

        info!("database integrity check passed");
        Ok(())
    }

    /// List foreign key violations as `table row N -> parent` strings.
    pub fn foreign_key_violations(&self) -> GcResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("PRAGMA foreign_key_check")
            .map_err(|e| GcError::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                let table: String = row.get(0)?;
                let rowid: i64 = row.get(1)?;
                let parent: String = row.get(2)?;
                Ok(format!("{table} row {rowid} -> {parent}"))
            })
            .map_err(|e| GcError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| GcError::Database(e.to_string()))?;
        Ok(rows)
    }

    /// Execute a function within a database transaction.
    pub fn transaction<T, F>(&self, f: F) -> GcResult<T>
    where
        F: FnOnce(&Connection) -> GcResult<T>,
    {
        let mut conn = self.conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| GcError::Database(e.to_string()))?;

        let result = f(&tx)?;

        tx.commit()
            .map_err(|e| GcError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get database statistics (row counts per table).
    pub fn stats(&self) -> GcResult<DatabaseStats> {
        let conn = self.conn()?;
        let mut tables = Vec::with_capacity(schema::TABLES.len());
        for table in schema::TABLES {
            let sql = format!("SELECT COUNT(*) FROM {table}");
            let count: i64 = conn
                .query_row(&sql, [], |row| row.get(0))
                .map_err(|e| GcError::Database(e.to_string()))?;
            tables.push((table.to_string(), count));
        }
        Ok(DatabaseStats { tables })
    }

    /// Reset the database by dropping and recreating all tables.
    pub fn reset(&self) -> GcResult<()> {
        warn!("resetting database - all data will be lost");
        let conn = self.conn()?;
        schema::drop_tables(&conn)?;
        schema::create_tables(&conn)?;
        migrations::run_migrations(&conn)?;
        info!("database reset complete");
        Ok(())
    }
}

/// Database row count statistics.
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    /// (table, row count) in schema order.
    pub tables: Vec<(String, i64)>,
}

impl DatabaseStats {
    /// Row count for a table, if the table is tracked.
    pub fn count(&self, table: &str) -> Option<i64> {
        self.tables.iter().find(|(name, _)| name == table).map(|(_, c)| *c)
    }
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .tables
            .iter()
            .map(|(table, count)| format!("{table}={count}"))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// r2d2 connection customizer that applies PRAGMA settings.
#[derive(Debug)]
struct ConnectionCustomizer {
    wal_mode: bool,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        if self.wal_mode {
            conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        }

        // Cascades on sub_items/estimates/replies rely on foreign_keys=ON.
        conn.execute_batch(
            "PRAGMA synchronous=NORMAL;
             PRAGMA temp_store=MEMORY;
             PRAGMA busy_timeout=5000;
             PRAGMA foreign_keys=ON;",
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_db() -> (Database, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.db");
        let config = DatabaseConfig::default();
        let db = Database::init(&path, &config).unwrap();
        (db, dir)
    }

    #[test]
    fn test_database_init() {
        let (db, _dir) = test_db();
        let stats = db.stats().unwrap();
        assert_eq!(stats.count("members"), Some(0));
        assert_eq!(stats.count("member_estimates"), Some(0));
        assert!(stats.count("main_items").unwrap() > 0);
        assert_eq!(stats.count("nope"), None);
    }

    #[test]
    fn test_integrity_check() {
        let (db, _dir) = test_db();
        assert!(db.run_integrity_check().is_ok());
        assert!(db.foreign_key_violations().unwrap().is_empty());
    }

    #[test]
    fn test_transaction_commits() {
        let (db, _dir) = test_db();
        let result = db.transaction(|conn| {
            conn.execute(
                "INSERT INTO experts (store_name, location, distance, description) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params!["고수청소", "서울 강남구", 10, "깨끗하게 청소합니다"],
            ).map_err(|e| GcError::Database(e.to_string()))?;
            Ok(42)
        });
        assert_eq!(result.unwrap(), 42);
        assert_eq!(db.stats().unwrap().count("experts"), Some(1));
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let (db, _dir) = test_db();
        let result: GcResult<()> = db.transaction(|conn| {
            conn.execute(
                "INSERT INTO experts (store_name, location, distance, description) VALUES ('a', 'b', 1, 'c')",
                [],
            ).map_err(|e| GcError::Database(e.to_string()))?;
            Err(GcError::Internal("abort".into()))
        });
        assert!(result.is_err());
        assert_eq!(db.stats().unwrap().count("experts"), Some(0));
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let (db, _dir) = test_db();
        let conn = db.conn().unwrap();
        let result = conn.execute(
            "INSERT INTO buckets (expert_id, member_id) VALUES (999, 999)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_reset_reseeds_categories() {
        let (db, _dir) = test_db();
        db.conn()
            .unwrap()
            .execute("DELETE FROM main_items", [])
            .unwrap();
        db.reset().unwrap();
        assert!(db.stats().unwrap().count("main_items").unwrap() > 0);
    }
}
