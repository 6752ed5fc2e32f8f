// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod checks;
pub mod tokens;
pub mod users;

use crate::error::{AppError, Result};
use crate::AppState;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{routing::any, Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Request header carrying the session token id.
pub const TOKEN_HEADER: &str = "token";

/// Expected length of a stored phone number.
pub const PHONE_LENGTH: usize = 10;

/// Ping handler - answers any verb.
async fn ping() -> Json<serde_json::Value> {
    Json(json!({}))
}

/// Fallback for unmatched paths.
async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({})))
}

/// Build the complete router with all routes.
///
/// The routing table is immutable once built: one entry per resource
/// family, verb dispatch inside each entry (unmatched verbs on a matched
/// path answer 405), and a fixed not-found handler for everything else.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ping", any(ping))
        .merge(users::routes())
        .merge(tokens::routes())
        .merge(checks::routes())
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

// ─── Shared Request Helpers ──────────────────────────────────

/// Pull the session token id out of the `token` header.
pub(crate) fn token_header(headers: &HeaderMap) -> Result<String> {
    headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(AppError::Unauthorized)
}

/// Trimmed, non-empty string field.
pub(crate) fn non_empty(field: Option<&str>) -> Option<String> {
    field
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Phone number at its exact canonical length, used for lookups.
pub(crate) fn phone_exact(field: Option<&str>) -> Option<String> {
    non_empty(field).filter(|v| v.len() == PHONE_LENGTH)
}

/// Opaque id of the given fixed length.
pub(crate) fn id_exact(field: Option<&str>, length: usize) -> Option<String> {
    non_empty(field).filter(|v| v.len() == length)
}
