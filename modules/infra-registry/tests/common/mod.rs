#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Shared harness: a fresh in-memory registry per test, driven through the
//! real router with `oneshot`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use infra_registry::{DatabaseConfig, InfraRegistry};
use serde_json::Value;
use tower::ServiceExt; // for oneshot

pub async fn app() -> Router {
    let db = DatabaseConfig::in_memory()
        .connect()
        .await
        .expect("in-memory database");
    InfraRegistry::init(db)
        .await
        .expect("registry init")
        .router()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let header_str = |name: header::HeaderName| {
        response
            .headers()
            .get(name)
            .map(|v| v.to_str().unwrap().to_owned())
    };
    let location = header_str(header::LOCATION);
    let content_type = header_str(header::CONTENT_TYPE);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse JSON body")
    };

    TestResponse {
        status,
        location,
        content_type,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> TestResponse {
    send(app, json_request("POST", uri, body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: &Value) -> TestResponse {
    send(app, json_request("PUT", uri, body)).await
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Field names reported in a 422 problem body.
pub fn error_fields(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["field"].as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}
