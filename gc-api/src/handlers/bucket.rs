//! Bucket (favorite expert) handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use gc_services::dto::{BucketRequest, BucketResponse, BucketsResponse};

use crate::error::ApiResult;
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketStatusQuery {
    pub expert_id: i64,
    pub member_id: i64,
}

pub async fn find_all(State(state): State<AppState>) -> ApiResult<Json<BucketsResponse>> {
    let response = state.services.buckets.read().await.find_all()?;
    Ok(Json(response))
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BucketRequest>,
) -> ApiResult<Json<BucketResponse>> {
    let response = state.services.buckets.read().await.create(&request)?;
    Ok(Json(response))
}

pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<StatusCode> {
    state.services.buckets.read().await.delete_by_id(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /buckets/{status}?expertId=&memberId=`. The path segment is a
/// placeholder; only the query decides the answer.
pub async fn check_status(
    State(state): State<AppState>,
    ApiPath(_status): ApiPath<String>,
    ApiQuery(query): ApiQuery<BucketStatusQuery>,
) -> ApiResult<Json<bool>> {
    let exists = state
        .services
        .buckets
        .read()
        .await
        .check_status(query.expert_id, query.member_id)?;
    Ok(Json(exists))
}
