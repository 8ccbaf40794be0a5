use serde::{Deserialize, Serialize};

use gc_core::constants::{MAX_PASSWORD_CHARS, MIN_PASSWORD_CHARS};
use gc_core::error::GcResult;
use gc_core::validation::{Validate, Violations, EMAIL, KOREAN_NAME, PHONE_NUMBER};
use gc_models::Member;

const REASON_PASSWORD_SIZE: &str = "비밀번호는 8자 이상 20자 이하로 입력해주세요.";

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberSignUpRequest {
    pub name: String,
    pub password: String,
    pub email: String,
    pub phone_number: String,
}

impl MemberSignUpRequest {
    pub fn new(name: &str, password: &str, email: &str, phone_number: &str) -> Self {
        Self {
            name: name.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            phone_number: phone_number.to_string(),
        }
    }
}

// Keeps the plaintext password out of logs.
impl std::fmt::Debug for MemberSignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberSignUpRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .finish_non_exhaustive()
    }
}

impl Validate for MemberSignUpRequest {
    fn validate(&self) -> GcResult<()> {
        let mut v = Violations::new();
        v.not_blank("name", &self.name, "이름은 필수 입력입니다.")
            .matches("name", &self.name, &KOREAN_NAME, "이름은 한글만 입력 가능합니다.");

        let chars = self.password.chars().count();
        // Rejected passwords are not echoed back.
        v.check(
            (MIN_PASSWORD_CHARS..=MAX_PASSWORD_CHARS).contains(&chars),
            "password",
            "",
            REASON_PASSWORD_SIZE,
        );

        v.matches("email", &self.email, &EMAIL, "이메일 형식이 올바르지 않습니다.")
            .matches(
                "phoneNumber",
                &self.phone_number,
                &PHONE_NUMBER,
                "전화번호 형식이 올바르지 않습니다. (예: 010-0000-0000)",
            );
        v.into_result()
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberLoginRequest {
    pub email: String,
    pub password: String,
}

impl MemberLoginRequest {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

impl std::fmt::Debug for MemberLoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberLoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl Validate for MemberLoginRequest {
    fn validate(&self) -> GcResult<()> {
        let mut v = Violations::new();
        v.not_blank("email", &self.email, "이메일을 입력해주세요.");
        v.check(!self.password.is_empty(), "password", "", "비밀번호를 입력해주세요.");
        v.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

impl From<&Member> for MemberResponse {
    fn from(m: &Member) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            email: m.email.clone(),
            phone_number: m.phone_number.clone(),
        }
    }
}
