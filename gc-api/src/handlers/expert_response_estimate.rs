//! Expert response estimate handlers

use axum::{extract::State, http::StatusCode, Json};

use gc_services::dto::{
    ExpertResponseEstimateCreateRequest, ExpertResponseEstimateResponse,
    ExpertResponseEstimateUpdateRequest, ExpertResponseEstimatesResponse,
};

use crate::error::ApiResult;
use crate::extract::{ApiPath, ValidatedJson};
use crate::state::AppState;

/// `POST /expert-response-estimates/{expertId}`
pub async fn create(
    State(state): State<AppState>,
    ApiPath(expert_id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<ExpertResponseEstimateCreateRequest>,
) -> ApiResult<Json<ExpertResponseEstimateResponse>> {
    let response = state
        .services
        .expert_response_estimates
        .read()
        .await
        .create(expert_id, &request)?;
    Ok(Json(response))
}

pub async fn find_all(State(state): State<AppState>) -> ApiResult<Json<ExpertResponseEstimatesResponse>> {
    let response = state.services.expert_response_estimates.read().await.find_all()?;
    Ok(Json(response))
}

pub async fn find_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<ExpertResponseEstimateResponse>> {
    let response = state.services.expert_response_estimates.read().await.find_by_id(id)?;
    Ok(Json(response))
}

pub async fn find_all_by_member_estimate(
    State(state): State<AppState>,
    ApiPath(member_estimate_id): ApiPath<i64>,
) -> ApiResult<Json<ExpertResponseEstimatesResponse>> {
    let response = state
        .services
        .expert_response_estimates
        .read()
        .await
        .find_all_by_member_estimate(member_estimate_id)?;
    Ok(Json(response))
}

/// Responds with the bare id.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<ExpertResponseEstimateUpdateRequest>,
) -> ApiResult<Json<i64>> {
    let id = state.services.expert_response_estimates.read().await.update(id, &request)?;
    Ok(Json(id))
}

pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<StatusCode> {
    state.services.expert_response_estimates.read().await.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
