//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use gc_api::AppState;
use gc_core::config::{AppConfig, DatabaseConfig};
use gc_models::Database;
use gc_services::ServiceRegistry;

/// A router over a fresh, initialized registry.
pub struct TestApp {
    pub router: Router,
    pub registry: Arc<ServiceRegistry>,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let db = Database::init(&dir.path().join("test.db"), &DatabaseConfig::default())
            .expect("failed to init test database");
        let mut config = AppConfig::default();
        config.security.bcrypt_cost = 4;

        let registry = Arc::new(ServiceRegistry::new(config.clone(), db));
        registry.init_all().await.expect("failed to init services");
        let router = gc_api::app(AppState::new(registry.clone()), &config.server);

        Self {
            router,
            registry,
            _dir: dir,
        }
    }

    /// Send a request and return the status with the body parsed as JSON
    /// (`Value::Null` for an empty body).
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self.router.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("readable body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Create a member over HTTP and return its id.
    pub async fn create_member(&self, email: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/v1/members/signup",
                serde_json::json!({
                    "name": "김고수",
                    "password": "password123!",
                    "email": email,
                    "phoneNumber": "010-1234-5678",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "sign-up failed: {body}");
        body["id"].as_i64().expect("member id")
    }

    /// Create an expert over HTTP and return its id.
    pub async fn create_expert(&self, store_name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/v1/experts",
                serde_json::json!({
                    "storeName": store_name,
                    "location": "서울 강남구",
                    "distance": 5,
                    "description": "꼼꼼하게 작업합니다",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "expert creation failed: {body}");
        body["id"].as_i64().expect("expert id")
    }

    /// Create a member estimate for the first seeded sub item.
    pub async fn create_member_estimate(&self, member_id: i64) -> i64 {
        let (status, body) = self
            .post(
                &format!("/api/v1/member-estimates/{member_id}"),
                serde_json::json!({
                    "subItemId": 1,
                    "location": "서울 마포구",
                    "preferredStartDate": "2024-06-01T10:00:00",
                    "detailedDescription": "주말 오전 희망",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "estimate creation failed: {body}");
        body["id"].as_i64().expect("estimate id")
    }
}
