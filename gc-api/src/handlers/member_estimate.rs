//! Member estimate handlers

use axum::{extract::State, http::StatusCode, Json};

use gc_services::dto::{MemberEstimateRequest, MemberEstimateResponse, MemberEstimatesResponse};

use crate::error::ApiResult;
use crate::extract::{ApiPath, ValidatedJson};
use crate::state::AppState;

/// `POST /member-estimates/{memberId}`
pub async fn create(
    State(state): State<AppState>,
    ApiPath(member_id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<MemberEstimateRequest>,
) -> ApiResult<Json<MemberEstimateResponse>> {
    let response = state.services.member_estimates.read().await.create(member_id, &request)?;
    Ok(Json(response))
}

pub async fn find_all(State(state): State<AppState>) -> ApiResult<Json<MemberEstimatesResponse>> {
    let response = state.services.member_estimates.read().await.find_all()?;
    Ok(Json(response))
}

pub async fn find_all_by_member(
    State(state): State<AppState>,
    ApiPath(member_id): ApiPath<i64>,
) -> ApiResult<Json<MemberEstimatesResponse>> {
    let response = state.services.member_estimates.read().await.find_all_by_member(member_id)?;
    Ok(Json(response))
}

pub async fn find_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MemberEstimateResponse>> {
    let response = state.services.member_estimates.read().await.find_by_id(id)?;
    Ok(Json(response))
}

/// 200 with an empty body, unlike the other deletes.
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<StatusCode> {
    state.services.member_estimates.read().await.delete(id)?;
    Ok(StatusCode::OK)
}
