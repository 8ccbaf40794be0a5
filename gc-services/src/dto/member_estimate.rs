use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use gc_core::error::GcResult;
use gc_core::validation::{Validate, Violations};
use gc_models::MemberEstimate;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberEstimateRequest {
    pub sub_item_id: Option<i64>,
    pub location: String,
    /// ISO-8601 local date-time, e.g. `2024-05-01T09:30:00`.
    pub preferred_start_date: Option<NaiveDateTime>,
    pub detailed_description: String,
}

impl MemberEstimateRequest {
    pub fn new(
        sub_item_id: i64,
        location: &str,
        preferred_start_date: NaiveDateTime,
        detailed_description: &str,
    ) -> Self {
        Self {
            sub_item_id: Some(sub_item_id),
            location: location.to_string(),
            preferred_start_date: Some(preferred_start_date),
            detailed_description: detailed_description.to_string(),
        }
    }
}

impl Validate for MemberEstimateRequest {
    fn validate(&self) -> GcResult<()> {
        let mut v = Violations::new();
        v.not_null("subItemId", self.sub_item_id.as_ref(), "세부 서비스를 선택해주세요.")
            .not_blank("location", &self.location, "지역을 등록해주세요.")
            .not_null("preferredStartDate", self.preferred_start_date.as_ref(), "희망 시작일을 입력해주세요.");
        v.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberEstimateResponse {
    pub id: Option<i64>,
    pub member_id: i64,
    pub sub_item_id: i64,
    pub location: String,
    pub preferred_start_date: NaiveDateTime,
    pub detailed_description: String,
}

impl From<&MemberEstimate> for MemberEstimateResponse {
    fn from(e: &MemberEstimate) -> Self {
        Self {
            id: e.id,
            member_id: e.member_id,
            sub_item_id: e.sub_item_id,
            location: e.location.clone(),
            preferred_start_date: e.preferred_start_date,
            detailed_description: e.detailed_description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberEstimatesResponse {
    pub member_estimates: Vec<MemberEstimateResponse>,
}

impl From<&[MemberEstimate]> for MemberEstimatesResponse {
    fn from(estimates: &[MemberEstimate]) -> Self {
        Self {
            member_estimates: estimates.iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_location_reports_raw_value() {
        let json = r#"{"subItemId":1,"location":" ","preferredStartDate":"2024-05-01T09:30:00"}"#;
        let request: MemberEstimateRequest = serde_json::from_str(json).unwrap();
        let err = request.validate().unwrap_err();

        let errors = err.field_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "location");
        assert_eq!(errors[0].value, " ");
        assert_eq!(errors[0].reason, "지역을 등록해주세요.");
    }

    #[test]
    fn test_missing_start_date() {
        let request: MemberEstimateRequest =
            serde_json::from_str(r#"{"subItemId":1,"location":"서울"}"#).unwrap();
        let err = request.validate().unwrap_err();
        assert_eq!(err.field_errors()[0].field, "preferredStartDate");
        assert_eq!(err.field_errors()[0].value, "");
    }

    #[test]
    fn test_detailed_description_optional() {
        let request: MemberEstimateRequest = serde_json::from_str(
            r#"{"subItemId":1,"location":"서울","preferredStartDate":"2024-05-01T09:30:00"}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.detailed_description, "");
    }
}
