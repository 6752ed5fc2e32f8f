// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uptime_tracker::config::Config;
use uptime_tracker::routes::create_router;
use uptime_tracker::services::TokenService;
use uptime_tracker::store::FileStore;
use uptime_tracker::AppState;

/// Test application backed by a throwaway data directory.
///
/// The `TempDir` is held so the directory lives as long as the app.
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    _data_dir: tempfile::TempDir,
}

/// Create a test app with a fresh store under a temp directory.
#[allow(dead_code)]
pub async fn create_test_app() -> TestApp {
    let data_dir = tempfile::tempdir().expect("create temp data dir");

    let config = Config {
        data_dir: data_dir.path().to_path_buf(),
        ..Config::default()
    };

    let store = FileStore::open(&config.data_dir)
        .await
        .expect("open test store");
    let tokens = TokenService::new(
        store.clone(),
        config.hashing_secret.clone(),
        config.session_duration_secs,
    );

    let state = Arc::new(AppState {
        config,
        store,
        tokens,
    });

    TestApp {
        router: create_router(state.clone()),
        state,
        _data_dir: data_dir,
    }
}

/// Send one request and decode the JSON response body.
///
/// `token` goes into the `token` header when supplied; `body` is
/// serialized as the JSON payload.
#[allow(dead_code)]
pub async fn request(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("token", token);
    }

    let body = match body {
        Some(json) => Body::from(json.to_string()),
        None => Body::empty(),
    };

    let response = app
        .router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Sign up a user with sensible defaults.
#[allow(dead_code)]
pub async fn signup(app: &TestApp, phone: &str, password: &str) -> StatusCode {
    let (status, _) = request(
        app,
        "POST",
        "/users",
        None,
        Some(serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "phone": phone,
            "password": password,
            "tosAgreement": true,
        })),
    )
    .await;

    status
}

/// Log in and return the issued token id.
#[allow(dead_code)]
pub async fn login(app: &TestApp, phone: &str, password: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/tokens",
        None,
        Some(serde_json::json!({ "phone": phone, "password": password })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "login failed: {body}");

    body["id"].as_str().expect("token id in response").to_string()
}

/// Create a valid check for the given token and return its id.
#[allow(dead_code)]
pub async fn create_check(app: &TestApp, token: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/checks",
        Some(token),
        Some(serde_json::json!({
            "protocol": "http",
            "url": "example.com",
            "method": "get",
            "successCodes": [200],
            "timeoutSeconds": 3,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "check creation failed: {body}");

    body["id"].as_str().expect("check id in response").to_string()
}
