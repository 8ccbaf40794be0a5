//! Shared test utilities for integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use gc_core::config::{AppConfig, DatabaseConfig};
use gc_models::{Database, Expert, Member};
use gc_services::event_bus::EventBus;
use gc_services::registry::ServiceRegistry;
use tempfile::TempDir;

/// Create a temporary database with full schema and migrations applied.
/// Returns the Database and the TempDir (must be held alive for the duration of the test).
pub fn create_test_db() -> (Database, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::default();
    let db = Database::init(&path, &config).expect("failed to init test database");
    (db, dir)
}

/// Default configuration with the cheapest bcrypt cost so hashing stays fast.
pub fn create_test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.security.bcrypt_cost = 4;
    config
}

/// Create an EventBus with a small buffer suitable for tests.
pub fn create_test_event_bus() -> EventBus {
    EventBus::new(64)
}

/// Build and initialize a registry over a fresh database.
pub async fn create_test_registry() -> (ServiceRegistry, TempDir) {
    let (db, dir) = create_test_db();
    let registry = ServiceRegistry::new(create_test_config(), db);
    registry.init_all().await.expect("failed to init services");
    (registry, dir)
}

/// A fixed start date used by estimate fixtures.
pub fn start_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .expect("valid fixture date")
}

/// Insert a member directly, bypassing hashing. Returns the id.
pub fn seed_member(db: &Database, email: &str) -> i64 {
    let conn = db.conn().expect("failed to get connection for seeding");
    Member::new("성이름", "not-a-real-hash", email, "010-1234-5678")
        .save(&conn)
        .expect("failed to insert member")
}

/// Insert an expert directly. Returns the id.
pub fn seed_expert(db: &Database, store_name: &str) -> i64 {
    let conn = db.conn().expect("failed to get connection for seeding");
    Expert::new(store_name, "서울 강남구", 5, "꼼꼼하게 작업합니다")
        .save(&conn)
        .expect("failed to insert expert")
}

/// Id of the first seeded sub item (under the first seeded main item).
pub fn seeded_sub_item(db: &Database) -> i64 {
    let conn = db.conn().expect("failed to get connection");
    conn.query_row("SELECT MIN(id) FROM sub_items WHERE main_item_id = 1", [], |row| row.get(0))
        .expect("seeded catalogue should have sub items")
}
