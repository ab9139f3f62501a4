//! Test helper utilities for webserver router tests

#![allow(dead_code)]

use std::time::Duration;

use agency::{BreedRegistryConfig, MockBreedValidator, RealMemoryStore, RealSqliteStore};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use webserver::{ServerConfig, WebServer};

pub const KNOWN_BREED: &str = "Bengal";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        log_level: "debug".to_string(),
        breed_registry: BreedRegistryConfig::new("http://127.0.0.1:9/v1", Duration::from_secs(1)),
        cors_origins: vec!["http://localhost".to_string()],
        database_path: None,
    }
}

/// Registry double that knows a single breed
pub fn validator() -> MockBreedValidator {
    let mut validator = MockBreedValidator::new();
    validator
        .expect_validate_breed()
        .returning(|breed| Ok(breed.eq_ignore_ascii_case(KNOWN_BREED)));
    validator
}

pub fn test_server() -> WebServer<RealMemoryStore, MockBreedValidator> {
    WebServer::new(test_config(), RealMemoryStore::new(), validator())
}

/// Router wired to a fresh memory store
pub fn test_router() -> Router {
    test_server().build_router()
}

/// Router wired to a fresh in-memory SQLite database
pub fn sqlite_router() -> Router {
    let store = RealSqliteStore::open_in_memory().unwrap();
    WebServer::new(test_config(), store, validator()).build_router()
}

/// Send one request through the router and decode the JSON body, if any
pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(router, request).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn cat_payload(name: &str) -> Value {
    serde_json::json!({
        "name": name,
        "years_experience": 4,
        "breed": KNOWN_BREED,
        "salary": 2000.0
    })
}

pub fn mission_payload(target_count: usize) -> Value {
    let targets: Vec<Value> = (1..=target_count)
        .map(|i| serde_json::json!({"name": format!("Target {i}"), "country": "Peru", "notes": ""}))
        .collect();
    serde_json::json!({ "targets": targets })
}
