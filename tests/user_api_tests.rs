// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User resource API tests.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_signup_succeeds() {
    let app = common::create_test_app().await;

    let status = common::signup(&app, "5551234567", "secret").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let app = common::create_test_app().await;

    assert_eq!(common::signup(&app, "5551234567", "secret").await, StatusCode::OK);

    let (status, body) = common::request(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({
            "firstName": "Someone",
            "lastName": "Else",
            "phone": "5551234567",
            "password": "other",
            "tosAgreement": true,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_signup_missing_fields_rejected() {
    let app = common::create_test_app().await;

    // No tosAgreement
    let (status, _) = common::request(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "phone": "5551234567",
            "password": "secret",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Phone too short
    let (status, _) = common::request(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "phone": "555",
            "password": "secret",
            "tosAgreement": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Whitespace-only name
    let (status, _) = common::request(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({
            "firstName": "   ",
            "lastName": "Lovelace",
            "phone": "5551234567",
            "password": "secret",
            "tosAgreement": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_a_validation_failure() {
    let app = common::create_test_app().await;

    // Raw request with an unparseable body: normalizes to an empty
    // payload, so the handler reports missing fields rather than a
    // transport error.
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .body(Body::from("{ this is not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_user_requires_token() {
    let app = common::create_test_app().await;
    common::signup(&app, "5551234567", "secret").await;

    let (status, _) = common::request(&app, "GET", "/users?phone=5551234567", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_user_strips_password_hash() {
    let app = common::create_test_app().await;
    common::signup(&app, "5551234567", "secret").await;
    let token = common::login(&app, "5551234567", "secret").await;

    let (status, body) =
        common::request(&app, "GET", "/users?phone=5551234567", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], "5551234567");
    assert_eq!(body["firstName"], "Ada");
    assert_eq!(body["checks"], json!([]));
    assert!(body.get("hashedPassword").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_token_bound_to_other_phone_is_rejected() {
    let app = common::create_test_app().await;
    common::signup(&app, "5551234567", "secret").await;
    common::signup(&app, "5559876543", "other").await;
    let other_token = common::login(&app, "5559876543", "other").await;

    let (status, _) = common::request(
        &app,
        "GET",
        "/users?phone=5551234567",
        Some(&other_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_merges_only_supplied_fields() {
    let app = common::create_test_app().await;
    common::signup(&app, "5551234567", "secret").await;
    let token = common::login(&app, "5551234567", "secret").await;

    let (status, _) = common::request(
        &app,
        "PUT",
        "/users",
        Some(&token),
        Some(json!({ "phone": "5551234567", "firstName": "Grace" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) =
        common::request(&app, "GET", "/users?phone=5551234567", Some(&token), None).await;
    assert_eq!(body["firstName"], "Grace");
    assert_eq!(body["lastName"], "Lovelace"); // untouched
    assert_eq!(body["tosAgreement"], true);
}

#[tokio::test]
async fn test_update_password_changes_login() {
    let app = common::create_test_app().await;
    common::signup(&app, "5551234567", "secret").await;
    let token = common::login(&app, "5551234567", "secret").await;

    let (status, _) = common::request(
        &app,
        "PUT",
        "/users",
        Some(&token),
        Some(json!({ "phone": "5551234567", "password": "newSecret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Old password no longer works, new one does.
    let (status, _) = common::request(
        &app,
        "POST",
        "/tokens",
        None,
        Some(json!({ "phone": "5551234567", "password": "secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::login(&app, "5551234567", "newSecret").await;
}

#[tokio::test]
async fn test_update_with_no_fields_rejected() {
    let app = common::create_test_app().await;
    common::signup(&app, "5551234567", "secret").await;
    let token = common::login(&app, "5551234567", "secret").await;

    let (status, _) = common::request(
        &app,
        "PUT",
        "/users",
        Some(&token),
        Some(json!({ "phone": "5551234567" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_user() {
    let app = common::create_test_app().await;
    common::signup(&app, "5551234567", "secret").await;
    let token = common::login(&app, "5551234567", "secret").await;

    let (status, _) =
        common::request(&app, "DELETE", "/users?phone=5551234567", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) =
        common::request(&app, "GET", "/users?phone=5551234567", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_missing_user_is_not_found() {
    let app = common::create_test_app().await;
    common::signup(&app, "5551234567", "secret").await;
    let token = common::login(&app, "5551234567", "secret").await;

    // Deleting the account leaves the token behind (no cascade), so the
    // same token still verifies against the phone and the lookup itself
    // reports the missing record.
    common::request(&app, "DELETE", "/users?phone=5551234567", Some(&token), None).await;

    let (status, body) =
        common::request(&app, "GET", "/users?phone=5551234567", Some(&token), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}
