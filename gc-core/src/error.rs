//! Global error types for the GosuCatcher application.
//!
//! Every failure across the workspace is expressed as a `GcError`. Domain
//! failures carry an `ErrorCode`, which is the stable identifier clients see
//! in the error body; infrastructure failures collapse to `C003` at the
//! HTTP boundary.

use serde::Serialize;
use thiserror::Error;

/// Convenience type alias for Results using GcError.
pub type GcResult<T> = Result<T, GcError>;

/// Unified error type covering all error categories in GosuCatcher.
#[derive(Error, Debug)]
pub enum GcError {
    // -- Domain errors --
    /// A referenced entity does not exist (or has been soft-deleted).
    #[error("entity not found: {0}")]
    EntityNotFound(ErrorCode),

    /// An entity with the same natural key already exists.
    #[error("duplicated entity: {0}")]
    Duplicated(ErrorCode),

    /// Credentials did not match.
    #[error("certification failed: {0}")]
    CertifiedFail(ErrorCode),

    /// One or more request fields violated their constraints.
    #[error("invalid input: {} violation(s)", .0.len())]
    InvalidInput(Vec<FieldError>),

    /// The request could not be decoded at all (bad JSON, bad path or query).
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    // -- Configuration errors --
    /// Failed to load or parse application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    // -- Database errors --
    /// SQLite database error.
    #[error("database error: {0}")]
    Database(String),

    /// Database migration failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// Database connection pool error.
    #[error("connection pool error: {0}")]
    Pool(String),

    /// Database integrity check failed.
    #[error("database integrity check failed: {0}")]
    IntegrityCheck(String),

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Password hashing or verification failed.
    #[error("password hash error: {0}")]
    PasswordHash(String),

    // -- Service errors --
    /// A service failed to initialize.
    #[error("service init error: {0}")]
    ServiceInit(String),

    // -- Generic --
    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GcError {
    /// Map this error to the code reported to clients.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            GcError::EntityNotFound(code)
            | GcError::Duplicated(code)
            | GcError::CertifiedFail(code) => *code,
            GcError::InvalidInput(_) => ErrorCode::InvalidInputValue,
            GcError::MalformedRequest(_) => ErrorCode::InvalidRequestBody,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// Per-field violations, empty for every kind except `InvalidInput`.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            GcError::InvalidInput(errors) => errors,
            _ => &[],
        }
    }

    /// Whether this error originates from infrastructure rather than the request.
    pub fn is_internal(&self) -> bool {
        self.error_code() == ErrorCode::InternalServerError
    }
}

impl From<serde_json::Error> for GcError {
    fn from(e: serde_json::Error) -> Self {
        GcError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for GcError {
    fn from(e: toml::de::Error) -> Self {
        GcError::Config(e.to_string())
    }
}

/// A single rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as it appears in the JSON body.
    pub field: String,
    /// The rejected value rendered as a string.
    pub value: String,
    /// Human-readable reason.
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Stable error codes exposed in API error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Common
    InvalidInputValue,
    InvalidRequestBody,
    InternalServerError,

    // Member
    NotFoundMember,
    DuplicatedMemberEmail,
    MemberCertifiedFail,

    // Expert
    NotFoundExpert,
    DuplicatedExpertStoreName,

    // Item
    NotFoundMainItem,
    NotFoundSubItem,
    DuplicatedMainItemName,
    DuplicatedSubItemName,

    // Estimate
    NotFoundMemberRequestEstimate,
    NotFoundExpertResponseEstimate,

    // Bucket
    NotFoundBucket,
    DuplicatedBucket,

    // Review
    NotFoundReview,
    NotFoundReply,
    DuplicatedReply,
}

impl ErrorCode {
    /// Short code string, e.g. `MRE001`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInputValue => "C001",
            Self::InvalidRequestBody => "C002",
            Self::InternalServerError => "C003",
            Self::NotFoundMember => "M001",
            Self::DuplicatedMemberEmail => "M002",
            Self::MemberCertifiedFail => "M003",
            Self::NotFoundExpert => "E001",
            Self::DuplicatedExpertStoreName => "E002",
            Self::NotFoundMainItem => "I001",
            Self::NotFoundSubItem => "I002",
            Self::DuplicatedMainItemName => "I003",
            Self::DuplicatedSubItemName => "I004",
            Self::NotFoundMemberRequestEstimate => "MRE001",
            Self::NotFoundExpertResponseEstimate => "ERE001",
            Self::NotFoundBucket => "B001",
            Self::DuplicatedBucket => "B002",
            Self::NotFoundReview => "R001",
            Self::NotFoundReply => "R002",
            Self::DuplicatedReply => "R003",
        }
    }

    /// Client-facing message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidInputValue => "잘못된 값을 입력하셨습니다.",
            Self::InvalidRequestBody => "요청 본문을 읽을 수 없습니다.",
            Self::InternalServerError => "서버 내부 오류입니다.",
            Self::NotFoundMember => "존재하지 않는 회원입니다.",
            Self::DuplicatedMemberEmail => "이미 가입된 이메일입니다.",
            Self::MemberCertifiedFail => "이메일 또는 비밀번호가 일치하지 않습니다.",
            Self::NotFoundExpert => "존재하지 않는 고수입니다.",
            Self::DuplicatedExpertStoreName => "이미 등록된 상호명입니다.",
            Self::NotFoundMainItem => "존재하지 않는 메인 서비스입니다.",
            Self::NotFoundSubItem => "존재하지 않는 세부 서비스입니다.",
            Self::DuplicatedMainItemName => "이미 존재하는 메인 서비스입니다.",
            Self::DuplicatedSubItemName => "이미 존재하는 세부 서비스입니다.",
            Self::NotFoundMemberRequestEstimate => "존재하지 않는 회원 요청 견적서입니다.",
            Self::NotFoundExpertResponseEstimate => "존재하지 않는 고수가 응답한 견적서 입니다.",
            Self::NotFoundBucket => "존재하지 않는 찜입니다.",
            Self::DuplicatedBucket => "이미 찜한 고수입니다.",
            Self::NotFoundReview => "존재하지 않는 리뷰입니다.",
            Self::NotFoundReply => "존재하지 않는 답글입니다.",
            Self::DuplicatedReply => "이미 답글이 작성된 리뷰입니다.",
        }
    }

    /// HTTP status code associated with this error code.
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidInputValue | Self::InvalidRequestBody => 400,
            Self::InternalServerError => 500,
            Self::MemberCertifiedFail => 401,
            Self::DuplicatedMemberEmail
            | Self::DuplicatedExpertStoreName
            | Self::DuplicatedMainItemName
            | Self::DuplicatedSubItemName
            | Self::DuplicatedBucket
            | Self::DuplicatedReply => 409,
            _ => 404,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CODES: &[ErrorCode] = &[
        ErrorCode::InvalidInputValue,
        ErrorCode::InvalidRequestBody,
        ErrorCode::InternalServerError,
        ErrorCode::NotFoundMember,
        ErrorCode::DuplicatedMemberEmail,
        ErrorCode::MemberCertifiedFail,
        ErrorCode::NotFoundExpert,
        ErrorCode::DuplicatedExpertStoreName,
        ErrorCode::NotFoundMainItem,
        ErrorCode::NotFoundSubItem,
        ErrorCode::DuplicatedMainItemName,
        ErrorCode::DuplicatedSubItemName,
        ErrorCode::NotFoundMemberRequestEstimate,
        ErrorCode::NotFoundExpertResponseEstimate,
        ErrorCode::NotFoundBucket,
        ErrorCode::DuplicatedBucket,
        ErrorCode::NotFoundReview,
        ErrorCode::NotFoundReply,
        ErrorCode::DuplicatedReply,
    ];

    #[test]
    fn test_not_found_codes_are_404() {
        for code in ALL_CODES.iter().filter(|c| c.code().ends_with("001") && !c.code().starts_with('C')) {
            assert_eq!(code.status(), 404, "{code}");
        }
        assert_eq!(ErrorCode::NotFoundMemberRequestEstimate.code(), "MRE001");
        assert_eq!(ErrorCode::NotFoundExpertResponseEstimate.code(), "ERE001");
    }

    #[test]
    fn test_codes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for code in ALL_CODES {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn test_error_kind_maps_to_code() {
        let err = GcError::EntityNotFound(ErrorCode::NotFoundExpert);
        assert_eq!(err.error_code().code(), "E001");
        assert_eq!(err.error_code().status(), 404);

        let err = GcError::InvalidInput(vec![FieldError::new("location", " ", "지역을 등록해주세요.")]);
        assert_eq!(err.error_code().code(), "C001");
        assert_eq!(err.field_errors().len(), 1);

        let err = GcError::Database("disk I/O error".into());
        assert_eq!(err.error_code(), ErrorCode::InternalServerError);
        assert!(err.is_internal());
        assert!(err.field_errors().is_empty());
    }

    #[test]
    fn test_gc_error_display() {
        let err = GcError::Config("bad value".to_string());
        assert_eq!(err.to_string(), "configuration error: bad value");

        let err = GcError::Duplicated(ErrorCode::DuplicatedBucket);
        assert_eq!(err.to_string(), "duplicated entity: [B002] 이미 찜한 고수입니다.");
    }
}
