//! Main item and sub item handlers

use axum::{extract::State, http::StatusCode, Json};

use gc_services::dto::{
    MainItemCreateRequest, MainItemResponse, MainItemUpdateRequest, MainItemsResponse,
    SubItemCreateRequest, SubItemResponse, SubItemUpdateRequest, SubItemsResponse,
};

use crate::error::ApiResult;
use crate::extract::{ApiPath, ValidatedJson};
use crate::state::AppState;

// ─── Main items ──────────────────────────────────────────────────────────────

pub async fn create_main_item(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<MainItemCreateRequest>,
) -> ApiResult<Json<MainItemResponse>> {
    let response = state.services.items.read().await.create_main_item(&request)?;
    Ok(Json(response))
}

pub async fn find_all_main_items(State(state): State<AppState>) -> ApiResult<Json<MainItemsResponse>> {
    let response = state.services.items.read().await.find_all_main_items()?;
    Ok(Json(response))
}

pub async fn find_main_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MainItemResponse>> {
    let response = state.services.items.read().await.find_main_item(id)?;
    Ok(Json(response))
}

pub async fn update_main_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<MainItemUpdateRequest>,
) -> ApiResult<Json<i64>> {
    let id = state.services.items.read().await.update_main_item(id, &request)?;
    Ok(Json(id))
}

pub async fn delete_main_item(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<StatusCode> {
    state.services.items.read().await.delete_main_item(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Sub items ───────────────────────────────────────────────────────────────

pub async fn create_sub_item(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SubItemCreateRequest>,
) -> ApiResult<Json<SubItemResponse>> {
    let response = state.services.items.read().await.create_sub_item(&request)?;
    Ok(Json(response))
}

pub async fn find_all_sub_items(State(state): State<AppState>) -> ApiResult<Json<SubItemsResponse>> {
    let response = state.services.items.read().await.find_all_sub_items()?;
    Ok(Json(response))
}

pub async fn find_sub_items_by_main_item(
    State(state): State<AppState>,
    ApiPath(main_item_id): ApiPath<i64>,
) -> ApiResult<Json<SubItemsResponse>> {
    let response = state
        .services
        .items
        .read()
        .await
        .find_all_sub_items_by_main_item(main_item_id)?;
    Ok(Json(response))
}

pub async fn find_sub_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<SubItemResponse>> {
    let response = state.services.items.read().await.find_sub_item(id)?;
    Ok(Json(response))
}

pub async fn update_sub_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<SubItemUpdateRequest>,
) -> ApiResult<Json<i64>> {
    let id = state.services.items.read().await.update_sub_item(id, &request)?;
    Ok(Json(id))
}

pub async fn delete_sub_item(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> ApiResult<StatusCode> {
    state.services.items.read().await.delete_sub_item(id)?;
    Ok(StatusCode::NO_CONTENT)
}
