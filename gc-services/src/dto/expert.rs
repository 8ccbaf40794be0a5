use serde::{Deserialize, Serialize};

use gc_core::error::GcResult;
use gc_core::validation::{Validate, Violations};
use gc_models::queries::RatingSummary;
use gc_models::Expert;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpertCreateRequest {
    pub store_name: String,
    pub location: String,
    pub distance: Option<i64>,
    pub description: String,
}

/// Updates carry the same fields and rules as creation.
pub type ExpertUpdateRequest = ExpertCreateRequest;

impl ExpertCreateRequest {
    pub fn new(store_name: &str, location: &str, distance: i64, description: &str) -> Self {
        Self {
            store_name: store_name.to_string(),
            location: location.to_string(),
            distance: Some(distance),
            description: description.to_string(),
        }
    }

    pub fn to_entity(&self) -> Expert {
        Expert::new(&self.store_name, &self.location, self.distance.unwrap_or_default(), &self.description)
    }
}

impl Validate for ExpertCreateRequest {
    fn validate(&self) -> GcResult<()> {
        let mut v = Violations::new();
        v.not_blank("storeName", &self.store_name, "가게 이름은 필수 입력입니다.")
            .not_blank("location", &self.location, "위치는 필수 입력입니다.");
        match self.distance {
            Some(distance) => v.positive("distance", distance, "거리는 양수만 가능합니다."),
            None => v.not_null::<i64>("distance", None, "거리는 필수 입력입니다."),
        };
        v.not_blank("description", &self.description, "부가 설명을 적어주세요.");
        v.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertResponse {
    pub id: Option<i64>,
    pub store_name: String,
    pub location: String,
    pub distance: i64,
    pub description: String,
}

impl From<&Expert> for ExpertResponse {
    fn from(e: &Expert) -> Self {
        Self {
            id: e.id,
            store_name: e.store_name.clone(),
            location: e.location.clone(),
            distance: e.distance,
            description: e.description.clone(),
        }
    }
}

/// Single-expert view including live review aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertDetailResponse {
    #[serde(flatten)]
    pub expert: ExpertResponse,
    pub review_count: i64,
    pub average_rating: f64,
}

impl ExpertDetailResponse {
    pub fn new(expert: &Expert, summary: RatingSummary) -> Self {
        Self {
            expert: expert.into(),
            review_count: summary.review_count,
            average_rating: summary.average_rating,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpertsResponse {
    pub experts: Vec<ExpertResponse>,
}

impl From<&[Expert]> for ExpertsResponse {
    fn from(experts: &[Expert]) -> Self {
        Self {
            experts: experts.iter().map(Into::into).collect(),
        }
    }
}
