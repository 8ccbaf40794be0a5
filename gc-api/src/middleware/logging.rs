//! Request logging middleware

use std::time::{Duration, Instant};

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use gc_core::constants::REQUEST_ID_HEADER;

const SLOW_REQUEST: Duration = Duration::from_millis(500);

/// Tag each request with an `x-request-id` (kept if the client sent one)
/// and log method, path, status and latency under that id.
pub async fn logging_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        request.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let span = tracing::info_span!("request", id = %request_id, %method, %path);

    let start = Instant::now();
    let mut response = next.run(request).instrument(span.clone()).await;
    let elapsed = start.elapsed();

    span.in_scope(|| {
        let status = response.status().as_u16();
        let latency_ms = elapsed.as_millis() as u64;
        if elapsed > SLOW_REQUEST {
            warn!(status, latency_ms, "slow request");
        } else {
            info!(status, latency_ms, "request completed");
        }
    });

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
