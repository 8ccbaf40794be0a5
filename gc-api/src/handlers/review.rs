//! Review and reply handlers

use axum::{extract::State, http::StatusCode, Json};

use gc_services::dto::{
    ReplyRequest, ReplyResponse, ReviewCreateRequest, ReviewResponse, ReviewUpdateRequest, ReviewsResponse,
};

use crate::error::ApiResult;
use crate::extract::{ApiPath, ValidatedJson};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ReviewCreateRequest>,
) -> ApiResult<Json<ReviewResponse>> {
    let response = state.services.reviews.read().await.create(&request)?;
    Ok(Json(response))
}

pub async fn find_all_by_expert(
    State(state): State<AppState>,
    ApiPath(expert_id): ApiPath<i64>,
) -> ApiResult<Json<ReviewsResponse>> {
    let response = state.services.reviews.read().await.find_all_by_expert(expert_id)?;
    Ok(Json(response))
}

pub async fn find_by_id(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<Json<ReviewResponse>> {
    let response = state.services.reviews.read().await.find_by_id(id)?;
    Ok(Json(response))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<ReviewUpdateRequest>,
) -> ApiResult<Json<i64>> {
    let id = state.services.reviews.read().await.update(id, &request)?;
    Ok(Json(id))
}

pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<StatusCode> {
    state.services.reviews.read().await.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /reviews/{id}/replies`
pub async fn create_reply(
    State(state): State<AppState>,
    ApiPath(review_id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<ReplyRequest>,
) -> ApiResult<Json<ReplyResponse>> {
    let response = state.services.reviews.read().await.create_reply(review_id, &request)?;
    Ok(Json(response))
}

pub async fn update_reply(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<ReplyRequest>,
) -> ApiResult<Json<i64>> {
    let id = state.services.reviews.read().await.update_reply(id, &request)?;
    Ok(Json(id))
}

pub async fn delete_reply(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<StatusCode> {
    state.services.reviews.read().await.delete_reply(id)?;
    Ok(StatusCode::NO_CONTENT)
}
