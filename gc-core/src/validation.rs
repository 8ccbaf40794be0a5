//! Field-level request validation.
//!
//! Request DTOs implement [`Validate`] by feeding each field through a
//! [`Violations`] collector. Every failed rule becomes one [`FieldError`];
//! the collector turns into `GcError::InvalidInput` when anything failed.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{FieldError, GcError, GcResult};

lazy_static! {
    /// Category names: Hangul syllables, digits and whitespace.
    pub static ref KOREAN_WITH_DIGITS: Regex = Regex::new(r"^[가-힣0-9\s]+$").unwrap();

    /// Person names: Hangul syllables only.
    pub static ref KOREAN_NAME: Regex = Regex::new(r"^[가-힣]+$").unwrap();

    pub static ref EMAIL: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+$").unwrap();

    /// Korean mobile numbers, e.g. `010-1234-5678`.
    pub static ref PHONE_NUMBER: Regex = Regex::new(r"^01[016789]-\d{3,4}-\d{4}$").unwrap();
}

/// Implemented by every inbound request that carries field constraints.
pub trait Validate {
    fn validate(&self) -> GcResult<()>;
}

/// Collects field violations in declaration order.
#[derive(Debug, Default)]
pub struct Violations {
    errors: Vec<FieldError>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, value: impl ToString, reason: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, value.to_string(), reason));
        }
        self
    }

    /// Value must contain at least one non-whitespace character.
    pub fn not_blank(&mut self, field: &str, value: &str, reason: &str) -> &mut Self {
        self.check(!value.trim().is_empty(), field, value, reason)
    }

    /// Value must be present.
    pub fn not_null<T: ToString>(&mut self, field: &str, value: Option<&T>, reason: &str) -> &mut Self {
        match value {
            Some(_) => self,
            None => self.check(false, field, "", reason),
        }
    }

    /// Value must be strictly greater than zero.
    pub fn positive(&mut self, field: &str, value: i64, reason: &str) -> &mut Self {
        self.check(value > 0, field, value, reason)
    }

    /// Value must lie within `min..=max`.
    pub fn range(&mut self, field: &str, value: i64, min: i64, max: i64, reason: &str) -> &mut Self {
        self.check((min..=max).contains(&value), field, value, reason)
    }

    /// Value must have at least `min` characters.
    pub fn min_chars(&mut self, field: &str, value: &str, min: usize, reason: &str) -> &mut Self {
        self.check(value.chars().count() >= min, field, value, reason)
    }

    /// Value must have at most `max` characters.
    pub fn max_chars(&mut self, field: &str, value: &str, max: usize, reason: &str) -> &mut Self {
        self.check(value.chars().count() <= max, field, value, reason)
    }

    /// Value must match `pattern`.
    pub fn matches(&mut self, field: &str, value: &str, pattern: &Regex, reason: &str) -> &mut Self {
        self.check(pattern.is_match(value), field, value, reason)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Finish validation.
    pub fn into_result(self) -> GcResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(GcError::InvalidInput(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_chars_counts_characters_not_bytes() {
        let mut v = Violations::new();
        v.min_chars("description", "상세설명을씁니다", 6, "too short");
        assert!(v.is_empty());

        let mut v = Violations::new();
        v.min_chars("description", "짧은 설명", 6, "too short");
        let err = v.into_result().unwrap_err();
        assert_eq!(err.field_errors()[0].value, "짧은 설명");
    }

    #[test]
    fn test_violations_keep_declaration_order() {
        let mut v = Violations::new();
        v.not_blank("storeName", "", "store")
            .not_blank("location", "  ", "location")
            .positive("distance", 0, "distance");
        let err = v.into_result().unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["storeName", "location", "distance"]);
    }

    #[test]
    fn test_not_null_renders_empty_value() {
        let mut v = Violations::new();
        v.not_null::<i64>("subItemId", None, "required");
        let err = v.into_result().unwrap_err();
        assert_eq!(err.field_errors()[0].value, "");
    }

    #[test]
    fn test_patterns() {
        assert!(KOREAN_WITH_DIGITS.is_match("청소 서비스 2"));
        assert!(!KOREAN_WITH_DIGITS.is_match("cleaning"));
        assert!(KOREAN_NAME.is_match("성이름"));
        assert!(EMAIL.is_match("abcd123@abc.com"));
        assert!(!EMAIL.is_match("abcd123"));
        assert!(PHONE_NUMBER.is_match("010-0000-0000"));
        assert!(!PHONE_NUMBER.is_match("02-000-0000"));
    }

    #[test]
    fn test_blank_value_reports_every_failed_rule() {
        let mut v = Violations::new();
        v.not_blank("name", "", "blank")
            .matches("name", "", &KOREAN_NAME, "pattern")
            .min_chars("description", "", 6, "size");
        let err = v.into_result().unwrap_err();
        let reasons: Vec<&str> = err.field_errors().iter().map(|e| e.reason.as_str()).collect();
        assert_eq!(reasons, vec!["blank", "pattern", "size"]);
    }
}
