use serde::{Deserialize, Serialize};

use gc_core::constants::MIN_ITEM_DESCRIPTION_CHARS;
use gc_core::error::GcResult;
use gc_core::validation::{Validate, Violations, KOREAN_WITH_DIGITS};
use gc_models::{MainItem, SubItem};

const REASON_NAME_REQUIRED: &str = "서비스명은 필수 입력 입니다.";
const REASON_NAME_PATTERN: &str = "서비스명은 한글과 숫자만 입력 가능합니다.";
const REASON_DESCRIPTION_REQUIRED: &str = "해당 서비스의 부가 설명을 적어주세요.";
const REASON_DESCRIPTION_SIZE: &str = "부가 설명은 6자 이상 작성해 주세요.";

// ─── Main items ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MainItemCreateRequest {
    pub name: String,
    pub description: String,
}

impl MainItemCreateRequest {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

impl Validate for MainItemCreateRequest {
    fn validate(&self) -> GcResult<()> {
        let mut v = Violations::new();
        v.not_blank("name", &self.name, REASON_NAME_REQUIRED)
            .not_blank("description", &self.description, REASON_DESCRIPTION_REQUIRED)
            .min_chars("description", &self.description, MIN_ITEM_DESCRIPTION_CHARS, REASON_DESCRIPTION_SIZE);
        v.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MainItemUpdateRequest {
    pub name: String,
    pub description: String,
}

impl MainItemUpdateRequest {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

impl Validate for MainItemUpdateRequest {
    fn validate(&self) -> GcResult<()> {
        let mut v = Violations::new();
        v.not_blank("name", &self.name, REASON_NAME_REQUIRED)
            .matches("name", &self.name, &KOREAN_WITH_DIGITS, REASON_NAME_PATTERN)
            .min_chars("description", &self.description, MIN_ITEM_DESCRIPTION_CHARS, REASON_DESCRIPTION_SIZE);
        v.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainItemResponse {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
}

impl From<&MainItem> for MainItemResponse {
    fn from(m: &MainItem) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            description: m.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainItemsResponse {
    pub main_items: Vec<MainItemResponse>,
}

impl From<&[MainItem]> for MainItemsResponse {
    fn from(items: &[MainItem]) -> Self {
        Self {
            main_items: items.iter().map(Into::into).collect(),
        }
    }
}

// ─── Sub items ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubItemCreateRequest {
    pub main_item_id: Option<i64>,
    pub name: String,
    pub description: String,
}

impl SubItemCreateRequest {
    pub fn new(main_item_id: i64, name: &str, description: &str) -> Self {
        Self {
            main_item_id: Some(main_item_id),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

impl Validate for SubItemCreateRequest {
    fn validate(&self) -> GcResult<()> {
        let mut v = Violations::new();
        v.not_null("mainItemId", self.main_item_id.as_ref(), "메인 서비스를 선택해주세요.")
            .not_blank("name", &self.name, REASON_NAME_REQUIRED)
            .matches("name", &self.name, &KOREAN_WITH_DIGITS, REASON_NAME_PATTERN)
            .min_chars("description", &self.description, MIN_ITEM_DESCRIPTION_CHARS, REASON_DESCRIPTION_SIZE);
        v.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubItemUpdateRequest {
    pub name: String,
    pub description: String,
}

impl SubItemUpdateRequest {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

impl Validate for SubItemUpdateRequest {
    fn validate(&self) -> GcResult<()> {
        let mut v = Violations::new();
        v.not_blank("name", &self.name, REASON_NAME_REQUIRED)
            .matches("name", &self.name, &KOREAN_WITH_DIGITS, REASON_NAME_PATTERN)
            .min_chars("description", &self.description, MIN_ITEM_DESCRIPTION_CHARS, REASON_DESCRIPTION_SIZE);
        v.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubItemResponse {
    pub id: Option<i64>,
    pub main_item_id: i64,
    pub name: String,
    pub description: String,
}

impl From<&SubItem> for SubItemResponse {
    fn from(s: &SubItem) -> Self {
        Self {
            id: s.id,
            main_item_id: s.main_item_id,
            name: s.name.clone(),
            description: s.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubItemsResponse {
    pub sub_items: Vec<SubItemResponse>,
}

impl From<&[SubItem]> for SubItemsResponse {
    fn from(items: &[SubItem]) -> Self {
        Self {
            sub_items: items.iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_item_update_rejects_latin_name() {
        let err = MainItemUpdateRequest::new("cleaning", "청소 관련 서비스").validate().unwrap_err();
        assert_eq!(err.field_errors().len(), 1);
        assert_eq!(err.field_errors()[0].reason, REASON_NAME_PATTERN);
    }

    #[test]
    fn test_main_item_create_accepts_any_name() {
        assert!(MainItemCreateRequest::new("Cleaning", "청소 관련 서비스").validate().is_ok());
    }

    #[test]
    fn test_blank_description_reports_both_rules() {
        let err = MainItemCreateRequest::new("청소", "").validate().unwrap_err();
        let reasons: Vec<&str> = err.field_errors().iter().map(|e| e.reason.as_str()).collect();
        assert_eq!(reasons, vec![REASON_DESCRIPTION_REQUIRED, REASON_DESCRIPTION_SIZE]);
    }

    #[test]
    fn test_sub_item_requires_parent() {
        let request: SubItemCreateRequest =
            serde_json::from_str(r#"{"name":"입주 청소","description":"새 집 입주 청소"}"#).unwrap();
        let err = request.validate().unwrap_err();
        assert_eq!(err.field_errors()[0].field, "mainItemId");
    }
}
