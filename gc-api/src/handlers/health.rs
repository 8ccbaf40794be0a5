//! Health check endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use gc_core::constants::APP_VERSION;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub services: Vec<ServiceHealth>,
}

#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub name: String,
    pub state: String,
    pub healthy: bool,
}

/// Liveness plus per-service state; `degraded` when any service is not running.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let services: Vec<ServiceHealth> = state
        .services
        .health_check()
        .await
        .into_iter()
        .map(|(name, service_state, healthy)| ServiceHealth {
            name,
            state: service_state.to_string(),
            healthy,
        })
        .collect();

    let status = if services.iter().all(|s| s.healthy) { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: APP_VERSION,
        uptime_seconds: state.uptime_seconds(),
        services,
    })
}
