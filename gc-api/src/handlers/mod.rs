//! API route handlers

pub mod bucket;
pub mod expert;
pub mod expert_response_estimate;
pub mod health;
pub mod item;
pub mod member;
pub mod member_estimate;
pub mod review;
