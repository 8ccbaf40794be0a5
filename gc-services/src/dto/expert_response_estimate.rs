use serde::{Deserialize, Serialize};

use gc_core::constants::MIN_ESTIMATE_DESCRIPTION_CHARS;
use gc_core::error::GcResult;
use gc_core::validation::{Validate, Violations};
use gc_models::ExpertResponseEstimate;

const REASON_MEMBER_ESTIMATE_ID: &str = "회원 요청 견적서 ID는 필수입니다.";
const REASON_TOTAL_COST: &str = "견적 비용은 양수만 가능합니다.";
const REASON_DESCRIPTION: &str = "견적서에 대한 설명은 6자 이상 적어주세요.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpertResponseEstimateCreateRequest {
    pub member_request_estimate_id: Option<i64>,
    pub total_cost: i64,
    pub description: String,
    pub is_often_used: bool,
}

impl ExpertResponseEstimateCreateRequest {
    pub fn new(member_request_estimate_id: i64, total_cost: i64, description: &str, is_often_used: bool) -> Self {
        Self {
            member_request_estimate_id: Some(member_request_estimate_id),
            total_cost,
            description: description.to_string(),
            is_often_used,
        }
    }

    pub fn to_entity(&self, expert_id: i64, member_estimate_id: i64) -> ExpertResponseEstimate {
        ExpertResponseEstimate::new(
            expert_id,
            member_estimate_id,
            self.total_cost,
            &self.description,
            self.is_often_used,
        )
    }
}

impl Validate for ExpertResponseEstimateCreateRequest {
    fn validate(&self) -> GcResult<()> {
        let mut v = Violations::new();
        v.not_null("memberRequestEstimateId", self.member_request_estimate_id.as_ref(), REASON_MEMBER_ESTIMATE_ID)
            .positive("totalCost", self.total_cost, REASON_TOTAL_COST)
            .min_chars("description", &self.description, MIN_ESTIMATE_DESCRIPTION_CHARS, REASON_DESCRIPTION);
        v.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpertResponseEstimateUpdateRequest {
    pub total_cost: i64,
    pub description: String,
    pub is_often_used: bool,
}

impl ExpertResponseEstimateUpdateRequest {
    pub fn new(total_cost: i64, description: &str, is_often_used: bool) -> Self {
        Self {
            total_cost,
            description: description.to_string(),
            is_often_used,
        }
    }
}

impl Validate for ExpertResponseEstimateUpdateRequest {
    fn validate(&self) -> GcResult<()> {
        let mut v = Violations::new();
        v.positive("totalCost", self.total_cost, REASON_TOTAL_COST)
            .min_chars("description", &self.description, MIN_ESTIMATE_DESCRIPTION_CHARS, REASON_DESCRIPTION);
        v.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertResponseEstimateResponse {
    pub id: Option<i64>,
    pub expert_id: i64,
    pub member_request_estimate_id: i64,
    pub total_cost: i64,
    pub description: String,
    pub is_often_used: bool,
}

impl From<&ExpertResponseEstimate> for ExpertResponseEstimateResponse {
    fn from(e: &ExpertResponseEstimate) -> Self {
        Self {
            id: e.id,
            expert_id: e.expert_id,
            member_request_estimate_id: e.member_estimate_id,
            total_cost: e.total_cost,
            description: e.description.clone(),
            is_often_used: e.is_often_used,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertResponseEstimatesResponse {
    pub expert_response_estimates_response: Vec<ExpertResponseEstimateResponse>,
}

impl From<&[ExpertResponseEstimate]> for ExpertResponseEstimatesResponse {
    fn from(estimates: &[ExpertResponseEstimate]) -> Self {
        Self {
            expert_response_estimates_response: estimates.iter().map(Into::into).collect(),
        }
    }
}
