//! GosuCatcher Services - Business logic and service layer.
//!
//! This crate provides the service trait, the service registry and the
//! concrete services behind the REST surface:
//! - Members (sign-up with bcrypt hashing, login, withdrawal)
//! - Experts (profiles, rating summary)
//! - Item catalogue (main items and their sub items)
//! - Member estimates and the experts' priced responses
//! - Buckets (members' favorite experts)
//! - Reviews and the expert's reply
//! - Event bus (typed notifications of domain writes)
//!
//! Request and response shapes live in [`dto`]; services accept and
//! return those and map domain failures onto `GcError` codes.

pub mod service;
pub mod registry;
pub mod event_bus;
pub mod dto;
pub mod member;
pub mod expert;
pub mod item;
pub mod member_estimate;
pub mod expert_response_estimate;
pub mod bucket;
pub mod review;

// Re-export key types
pub use service::{Service, ServiceState};
pub use registry::ServiceRegistry;
pub use event_bus::{AppEvent, EventBus};
pub use member::MemberService;
pub use expert::ExpertService;
pub use item::ItemService;
pub use member_estimate::MemberEstimateService;
pub use expert_response_estimate::ExpertResponseEstimateService;
pub use bucket::BucketService;
pub use review::ReviewService;
