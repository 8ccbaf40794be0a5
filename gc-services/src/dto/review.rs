use serde::{Deserialize, Serialize};

use gc_core::constants::{MAX_RATING, MIN_RATING, MIN_REVIEW_CONTENT_CHARS};
use gc_core::error::GcResult;
use gc_core::validation::{Validate, Violations};
use gc_models::queries::ReviewWithReply;
use gc_models::{Reply, Review};

const REASON_CONTENT: &str = "리뷰는 10자 이상 작성해주세요.";
const REASON_RATING: &str = "평점은 1점에서 5점 사이로 입력해주세요.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewCreateRequest {
    pub expert_id: Option<i64>,
    pub writer_id: Option<i64>,
    pub sub_item_id: Option<i64>,
    pub content: String,
    pub rating: i64,
}

impl ReviewCreateRequest {
    pub fn new(expert_id: i64, writer_id: i64, sub_item_id: i64, content: &str, rating: i64) -> Self {
        Self {
            expert_id: Some(expert_id),
            writer_id: Some(writer_id),
            sub_item_id: Some(sub_item_id),
            content: content.to_string(),
            rating,
        }
    }
}

impl Validate for ReviewCreateRequest {
    fn validate(&self) -> GcResult<()> {
        let mut v = Violations::new();
        v.not_null("expertId", self.expert_id.as_ref(), "고수 ID는 필수입니다.")
            .not_null("writerId", self.writer_id.as_ref(), "작성자 ID는 필수입니다.")
            .not_null("subItemId", self.sub_item_id.as_ref(), "세부 서비스를 선택해주세요.")
            .min_chars("content", &self.content, MIN_REVIEW_CONTENT_CHARS, REASON_CONTENT)
            .range("rating", self.rating, MIN_RATING, MAX_RATING, REASON_RATING);
        v.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewUpdateRequest {
    pub content: String,
    pub rating: i64,
}

impl ReviewUpdateRequest {
    pub fn new(content: &str, rating: i64) -> Self {
        Self {
            content: content.to_string(),
            rating,
        }
    }
}

impl Validate for ReviewUpdateRequest {
    fn validate(&self) -> GcResult<()> {
        let mut v = Violations::new();
        v.min_chars("content", &self.content, MIN_REVIEW_CONTENT_CHARS, REASON_CONTENT)
            .range("rating", self.rating, MIN_RATING, MAX_RATING, REASON_RATING);
        v.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplyRequest {
    pub content: String,
}

impl ReplyRequest {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }
}

impl Validate for ReplyRequest {
    fn validate(&self) -> GcResult<()> {
        let mut v = Violations::new();
        v.not_blank("content", &self.content, "답글 내용을 입력해주세요.");
        v.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyResponse {
    pub id: Option<i64>,
    pub review_id: i64,
    pub content: String,
}

impl From<&Reply> for ReplyResponse {
    fn from(r: &Reply) -> Self {
        Self {
            id: r.id,
            review_id: r.review_id,
            content: r.content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: Option<i64>,
    pub expert_id: i64,
    pub writer_id: i64,
    pub sub_item_id: i64,
    pub content: String,
    pub rating: i64,
    pub reply: Option<ReplyResponse>,
}

impl ReviewResponse {
    pub fn new(review: &Review, reply: Option<&Reply>) -> Self {
        Self {
            id: review.id,
            expert_id: review.expert_id,
            writer_id: review.writer_id,
            sub_item_id: review.sub_item_id,
            content: review.content.clone(),
            rating: review.rating,
            reply: reply.map(Into::into),
        }
    }
}

impl From<&ReviewWithReply> for ReviewResponse {
    fn from(r: &ReviewWithReply) -> Self {
        Self::new(&r.review, r.reply.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<ReviewResponse>,
}

impl From<&[ReviewWithReply]> for ReviewsResponse {
    fn from(reviews: &[ReviewWithReply]) -> Self {
        Self {
            reviews: reviews.iter().map(Into::into).collect(),
        }
    }
}
