//! GosuCatcher Models - Database schema, entities, migrations, and queries.
//!
//! This crate owns all data persistence: SQLite database initialization and
//! pooling, the relational schema for members, experts, categories,
//! estimates, buckets and reviews, versioned migrations, and the join
//! queries the service layer needs beyond single-entity finders.

pub mod db;
pub mod schema;
pub mod models;
pub mod queries;
pub mod migrations;

// Re-export key types
pub use db::{Database, DbPool};
pub use models::member::Member;
pub use models::expert::Expert;
pub use models::item::{MainItem, SubItem};
pub use models::member_estimate::MemberEstimate;
pub use models::expert_response_estimate::ExpertResponseEstimate;
pub use models::bucket::Bucket;
pub use models::review::{Reply, Review};
