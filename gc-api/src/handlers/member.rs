//! Member handlers

use axum::{extract::State, http::StatusCode, Json};

use gc_services::dto::{MemberLoginRequest, MemberResponse, MemberSignUpRequest};

use crate::error::ApiResult;
use crate::extract::{ApiPath, ValidatedJson};
use crate::state::AppState;

pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<MemberSignUpRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let response = state.services.members.read().await.sign_up(&request)?;
    Ok(Json(response))
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<MemberLoginRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let response = state.services.members.read().await.login(&request)?;
    Ok(Json(response))
}

pub async fn find_by_id(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<MemberResponse>> {
    let response = state.services.members.read().await.find_by_id(id)?;
    Ok(Json(response))
}

pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<StatusCode> {
    state.services.members.read().await.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
