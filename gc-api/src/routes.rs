//! API route definitions

use std::time::Duration;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use gc_core::config::ServerConfig;
use gc_core::constants::API_PREFIX;

use crate::handlers::{bucket, expert, expert_response_estimate, health, item, member, member_estimate, review};
use crate::middleware::logging_middleware;
use crate::state::AppState;

/// Versioned REST routes, mounted under `API_PREFIX`.
///
/// Paths that share a prefix share the parameter name too (`:id`), so
/// e.g. `POST /member-estimates/:id` takes a member id while
/// `GET /member-estimates/:id` takes an estimate id.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Buckets
        .route("/buckets", get(bucket::find_all).post(bucket::create))
        .route("/buckets/:id", get(bucket::check_status).delete(bucket::delete))
        // Expert response estimates
        .route("/expert-response-estimates", get(expert_response_estimate::find_all))
        .route(
            "/expert-response-estimates/:id",
            post(expert_response_estimate::create)
                .get(expert_response_estimate::find_by_id)
                .patch(expert_response_estimate::update)
                .delete(expert_response_estimate::delete),
        )
        .route(
            "/expert-response-estimates/member-estimates/:id",
            get(expert_response_estimate::find_all_by_member_estimate),
        )
        // Member estimates
        .route("/member-estimates", get(member_estimate::find_all))
        .route(
            "/member-estimates/:id",
            post(member_estimate::create)
                .get(member_estimate::find_by_id)
                .delete(member_estimate::delete),
        )
        .route("/member-estimates/members/:id", get(member_estimate::find_all_by_member))
        // Members
        .route("/members/signup", post(member::sign_up))
        .route("/members/login", post(member::login))
        .route("/members/:id", get(member::find_by_id).delete(member::delete))
        // Experts
        .route("/experts", get(expert::find_all).post(expert::create))
        .route(
            "/experts/:id",
            get(expert::find_by_id).patch(expert::update).delete(expert::delete),
        )
        // Main items
        .route("/main-items", get(item::find_all_main_items).post(item::create_main_item))
        .route(
            "/main-items/:id",
            get(item::find_main_item)
                .patch(item::update_main_item)
                .delete(item::delete_main_item),
        )
        // Sub items
        .route("/sub-items", get(item::find_all_sub_items).post(item::create_sub_item))
        .route(
            "/sub-items/:id",
            get(item::find_sub_item)
                .patch(item::update_sub_item)
                .delete(item::delete_sub_item),
        )
        .route("/sub-items/main-items/:id", get(item::find_sub_items_by_main_item))
        // Reviews and replies
        .route("/reviews", post(review::create))
        .route("/reviews/experts/:id", get(review::find_all_by_expert))
        .route(
            "/reviews/:id",
            get(review::find_by_id).patch(review::update).delete(review::delete),
        )
        .route("/reviews/:id/replies", post(review::create_reply))
        .route("/replies/:id", patch(review::update_reply).delete(review::delete_reply))
}

/// Complete application router with state and middleware applied.
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/health", get(health::health_check))
        .nest(API_PREFIX, api_routes())
        .layer(TimeoutLayer::new(Duration::from_millis(server.request_timeout_ms)))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state);

    if server.cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
