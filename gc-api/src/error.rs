//! HTTP error translation.
//!
//! Every handler returns `ApiResult<T>`. The wrapped `GcError` decides the
//! status through its `ErrorCode`; the body always has the same shape.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use gc_core::error::{ErrorCode, FieldError, GcError};

/// API error: a `GcError` on its way out as an HTTP response.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub GcError);

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub timestamp: String,
    pub code: &'static str,
    pub message: &'static str,
    pub errors: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, errors: Vec<FieldError>) -> Self {
        Self {
            timestamp: Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            code: code.code(),
            message: code.message(),
            errors,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.error_code();
        if self.0.is_internal() {
            error!(error = %self.0, "request failed");
        }

        let status = StatusCode::from_u16(code.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse::new(code, self.0.field_errors().to_vec());
        (status, Json(body)).into_response()
    }
}
