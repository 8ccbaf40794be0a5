//! Integration tests for the data layer.
//!
//! Tests database creation, schema, seeded catalogue, cascades and soft
//! deletes across tables, join queries, stats, reset and integrity checks.

mod common;

use gc_core::constants::DB_SCHEMA_VERSION;
use gc_models::migrations::{self, DEFAULT_CATEGORIES};
use gc_models::queries;
use gc_models::{Bucket, ExpertResponseEstimate, MainItem, Member, MemberEstimate, Reply, Review, SubItem};

// ---- Database initialization and WAL mode ----

#[test]
fn database_init_creates_file_and_wal_mode() {
    let (db, dir) = common::create_test_db();
    assert!(dir.path().join("test.db").exists(), "database file should exist after init");

    let conn = db.conn().unwrap();
    let journal_mode: String = conn
        .query_row("PRAGMA journal_mode", [], |row| row.get(0))
        .unwrap();
    assert_eq!(journal_mode.to_lowercase(), "wal", "database should be in WAL mode");
}

#[test]
fn database_init_creates_all_tables() {
    let (db, _dir) = common::create_test_db();
    let conn = db.conn().unwrap();

    for table in [
        "members",
        "experts",
        "main_items",
        "sub_items",
        "member_estimates",
        "expert_response_estimates",
        "buckets",
        "reviews",
        "replies",
        "schema_version",
    ] {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table {table} should exist");
    }
}

#[test]
fn migrations_record_latest_version_and_seed_catalogue() {
    let (db, _dir) = common::create_test_db();
    let conn = db.conn().unwrap();
    assert_eq!(migrations::get_schema_version(&conn).unwrap(), DB_SCHEMA_VERSION);

    let mains = MainItem::find_all(&conn).unwrap();
    assert_eq!(mains.len(), DEFAULT_CATEGORIES.len());
    let expected_subs: usize = DEFAULT_CATEGORIES.iter().map(|(_, _, subs)| subs.len()).sum();
    assert_eq!(SubItem::find_all(&conn).unwrap().len(), expected_subs);

    // Re-running is a no-op.
    migrations::run_migrations(&conn).unwrap();
    assert_eq!(MainItem::find_all(&conn).unwrap().len(), DEFAULT_CATEGORIES.len());
}

// ---- Cascades and soft deletes ----

#[test]
fn deleting_member_estimate_cascades_to_responses() {
    let (db, _dir) = common::create_test_db();
    let member_id = common::seed_member(&db, "a@example.com");
    let expert_id = common::seed_expert(&db, "가게");
    let sub_item_id = common::seeded_sub_item(&db);
    let conn = db.conn().unwrap();

    let estimate_id = MemberEstimate::new(member_id, sub_item_id, "서울", common::start_date(), "")
        .save(&conn)
        .unwrap();
    let response_id = ExpertResponseEstimate::new(expert_id, estimate_id, 10_000, "설명입니다요", false)
        .save(&conn)
        .unwrap();

    assert!(MemberEstimate::delete(&conn, estimate_id).unwrap());
    assert!(ExpertResponseEstimate::find_by_id(&conn, response_id).unwrap().is_none());
    assert!(!MemberEstimate::delete(&conn, estimate_id).unwrap());
}

#[test]
fn deleting_main_item_cascades_to_unreferenced_sub_items() {
    let (db, _dir) = common::create_test_db();
    let conn = db.conn().unwrap();

    let main_id = MainItem::new("반려동물", "반려동물 돌봄 서비스").save(&conn).unwrap();
    let sub_id = SubItem::new(main_id, "산책", "반려견 산책 대행").save(&conn).unwrap();

    assert!(MainItem::delete(&conn, main_id).unwrap());
    assert!(SubItem::find_by_id(&conn, sub_id).unwrap().is_none());
}

#[test]
fn soft_deleted_member_is_hidden_but_row_kept() {
    let (db, _dir) = common::create_test_db();
    let member_id = common::seed_member(&db, "quit@example.com");
    let conn = db.conn().unwrap();

    assert!(Member::soft_delete(&conn, member_id).unwrap());
    assert!(Member::find_by_id(&conn, member_id).unwrap().is_none());
    assert!(!Member::exists_by_email(&conn, "quit@example.com").unwrap());
    assert_eq!(db.stats().unwrap().count("members"), Some(1));
    assert!(!Member::soft_delete(&conn, member_id).unwrap());
}

#[test]
fn review_soft_delete_takes_reply_along() {
    let (db, _dir) = common::create_test_db();
    let writer = common::seed_member(&db, "w@example.com");
    let expert_id = common::seed_expert(&db, "가게");
    let sub_item_id = common::seeded_sub_item(&db);

    let (review_id, reply_id) = db
        .transaction(|conn| {
            let review_id = Review::new(expert_id, writer, sub_item_id, "꼼꼼하게 잘 해주셨습니다", 4).save(conn)?;
            let reply_id = Reply::new(review_id, "감사합니다").save(conn)?;
            Ok((review_id, reply_id))
        })
        .unwrap();

    assert!(db.transaction(|conn| Review::soft_delete(conn, review_id)).unwrap());

    let conn = db.conn().unwrap();
    assert!(Review::find_by_id(&conn, review_id).unwrap().is_none());
    assert!(Reply::find_by_id(&conn, reply_id).unwrap().is_none());
    assert!(Reply::find_by_review(&conn, review_id).unwrap().is_none());
}

// ---- Join queries ----

#[test]
fn reviews_with_reply_skip_deleted_rows() {
    let (db, _dir) = common::create_test_db();
    let writer = common::seed_member(&db, "w@example.com");
    let expert_id = common::seed_expert(&db, "가게");
    let other_expert = common::seed_expert(&db, "다른가게");
    let sub_item_id = common::seeded_sub_item(&db);
    let conn = db.conn().unwrap();

    let kept = Review::new(expert_id, writer, sub_item_id, "첫 후기입니다 좋아요", 5).save(&conn).unwrap();
    let dropped = Review::new(expert_id, writer, sub_item_id, "두번째 후기입니다 별로", 1).save(&conn).unwrap();
    Review::new(other_expert, writer, sub_item_id, "다른 가게의 후기입니다", 3).save(&conn).unwrap();
    let reply_id = Reply::new(kept, "감사합니다").save(&conn).unwrap();
    Review::soft_delete(&conn, dropped).unwrap();

    let rows = queries::reviews_with_reply_by_expert(&conn, expert_id).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].review.id, Some(kept));
    assert_eq!(rows[0].reply.as_ref().and_then(|r| r.id), Some(reply_id));

    let summary = queries::expert_rating_summary(&conn, expert_id).unwrap();
    assert_eq!(summary.review_count, 1);
    assert!((summary.average_rating - 5.0).abs() < f64::EPSILON);
}

#[test]
fn bucket_pair_lookup_is_exact() {
    let (db, _dir) = common::create_test_db();
    let member_id = common::seed_member(&db, "m@example.com");
    let expert_id = common::seed_expert(&db, "가게");
    let conn = db.conn().unwrap();

    Bucket::new(expert_id, member_id).save(&conn).unwrap();
    assert!(Bucket::exists_by_pair(&conn, expert_id, member_id).unwrap());
    assert!(!Bucket::exists_by_pair(&conn, member_id + 10, expert_id + 10).unwrap());

    // The schema refuses a second row for the same pair.
    assert!(Bucket::new(expert_id, member_id).save(&conn).is_err());
}

// ---- Maintenance ----

#[test]
fn reset_clears_data_and_reseeds() {
    let (db, _dir) = common::create_test_db();
    common::seed_member(&db, "m@example.com");
    common::seed_expert(&db, "가게");

    db.reset().unwrap();

    let stats = db.stats().unwrap();
    assert_eq!(stats.count("members"), Some(0));
    assert_eq!(stats.count("experts"), Some(0));
    assert_eq!(stats.count("main_items"), Some(DEFAULT_CATEGORIES.len() as i64));
    assert!(stats.to_string().contains("members=0"));
}

#[test]
fn integrity_check_passes_on_populated_db() {
    let (db, _dir) = common::create_test_db();
    let member_id = common::seed_member(&db, "m@example.com");
    let expert_id = common::seed_expert(&db, "가게");
    Bucket::new(expert_id, member_id).save(&db.conn().unwrap()).unwrap();

    db.run_integrity_check().unwrap();
    assert!(db.foreign_key_violations().unwrap().is_empty());
}
