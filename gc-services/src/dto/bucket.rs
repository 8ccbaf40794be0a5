use serde::{Deserialize, Serialize};

use gc_core::error::GcResult;
use gc_core::validation::{Validate, Violations};
use gc_models::Bucket;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BucketRequest {
    pub expert_id: Option<i64>,
    pub member_id: Option<i64>,
}

impl BucketRequest {
    pub fn new(expert_id: i64, member_id: i64) -> Self {
        Self {
            expert_id: Some(expert_id),
            member_id: Some(member_id),
        }
    }
}

impl Validate for BucketRequest {
    fn validate(&self) -> GcResult<()> {
        let mut v = Violations::new();
        v.not_null("expertId", self.expert_id.as_ref(), "고수 ID는 필수입니다.")
            .not_null("memberId", self.member_id.as_ref(), "회원 ID는 필수입니다.");
        v.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketResponse {
    pub id: Option<i64>,
    pub expert_id: i64,
    pub member_id: i64,
}

impl From<&Bucket> for BucketResponse {
    fn from(b: &Bucket) -> Self {
        Self {
            id: b.id,
            expert_id: b.expert_id,
            member_id: b.member_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketsResponse {
    pub buckets: Vec<BucketResponse>,
}

impl From<&[Bucket]> for BucketsResponse {
    fn from(buckets: &[Bucket]) -> Self {
        Self {
            buckets: buckets.iter().map(Into::into).collect(),
        }
    }
}
