//! Request and response bodies exchanged with HTTP clients.
//!
//! Requests deserialize from camelCase JSON and implement
//! [`Validate`](gc_core::Validate); missing string fields default to `""`
//! so that validation, not deserialization, reports them. Responses are
//! flat projections of the entity models.

pub mod bucket;
pub mod expert;
pub mod expert_response_estimate;
pub mod item;
pub mod member;
pub mod member_estimate;
pub mod review;

pub use bucket::{BucketRequest, BucketResponse, BucketsResponse};
pub use expert::{ExpertCreateRequest, ExpertDetailResponse, ExpertResponse, ExpertUpdateRequest, ExpertsResponse};
pub use expert_response_estimate::{
    ExpertResponseEstimateCreateRequest, ExpertResponseEstimateResponse,
    ExpertResponseEstimateUpdateRequest, ExpertResponseEstimatesResponse,
};
pub use item::{
    MainItemCreateRequest, MainItemResponse, MainItemUpdateRequest, MainItemsResponse,
    SubItemCreateRequest, SubItemResponse, SubItemUpdateRequest, SubItemsResponse,
};
pub use member::{MemberLoginRequest, MemberResponse, MemberSignUpRequest};
pub use member_estimate::{MemberEstimateRequest, MemberEstimateResponse, MemberEstimatesResponse};
pub use review::{ReplyRequest, ReplyResponse, ReviewCreateRequest, ReviewResponse, ReviewUpdateRequest, ReviewsResponse};
