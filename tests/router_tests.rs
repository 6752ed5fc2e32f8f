// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Routing behavior: ping, unknown paths, unmatched verbs.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_ping_answers_any_verb() {
    let app = common::create_test_app().await;

    for method in ["GET", "POST", "PUT", "DELETE", "PATCH"] {
        let (status, body) = common::request(&app, method, "/ping", None, None).await;
        assert_eq!(status, StatusCode::OK, "method {method}");
        assert_eq!(body, json!({}));
    }
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = common::create_test_app().await;

    let (status, body) = common::request(&app, "GET", "/no/such/resource", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_unmatched_verb_is_method_not_allowed() {
    let app = common::create_test_app().await;

    for path in ["/users", "/tokens", "/checks"] {
        let (status, _) = common::request(&app, "PATCH", path, None, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "path {path}");
    }
}
