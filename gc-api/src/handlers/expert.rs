//! Expert handlers

use axum::{extract::State, http::StatusCode, Json};

use gc_services::dto::{ExpertCreateRequest, ExpertDetailResponse, ExpertResponse, ExpertUpdateRequest, ExpertsResponse};

use crate::error::ApiResult;
use crate::extract::{ApiPath, ValidatedJson};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ExpertCreateRequest>,
) -> ApiResult<Json<ExpertResponse>> {
    let response = state.services.experts.read().await.create(&request)?;
    Ok(Json(response))
}

pub async fn find_all(State(state): State<AppState>) -> ApiResult<Json<ExpertsResponse>> {
    let response = state.services.experts.read().await.find_all()?;
    Ok(Json(response))
}

pub async fn find_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<ExpertDetailResponse>> {
    let response = state.services.experts.read().await.find_by_id(id)?;
    Ok(Json(response))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<ExpertUpdateRequest>,
) -> ApiResult<Json<i64>> {
    let id = state.services.experts.read().await.update(id, &request)?;
    Ok(Json(id))
}

pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<StatusCode> {
    state.services.experts.read().await.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
