// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token routes.

use crate::error::{AppError, Result};
use crate::extract::Lenient;
use crate::models::token::TOKEN_ID_LENGTH;
use crate::models::Token;
use crate::routes::{id_exact, non_empty, phone_exact};
use crate::store::{collections, StoreError};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/tokens",
        post(create_token)
            .get(get_token)
            .put(update_token)
            .delete(delete_token),
    )
}

// ─── Create (login) ──────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CreateTokenRequest {
    phone: Option<String>,
    password: Option<String>,
}

/// Log in: issue a fresh token for a phone/password pair.
async fn create_token(
    State(state): State<Arc<AppState>>,
    Lenient(req): Lenient<CreateTokenRequest>,
) -> Result<Json<Token>> {
    let (Some(phone), Some(password)) = (
        phone_exact(req.phone.as_deref()),
        non_empty(req.password.as_deref()),
    ) else {
        return Err(AppError::InvalidInput("phone, password".to_string()));
    };

    let token = state.tokens.issue(&phone, &password).await?;

    Ok(Json(token))
}

// ─── Read ────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct TokenIdQuery {
    id: Option<String>,
}

/// Read a token by its own id.
///
/// Knowing the id is the credential here, so this endpoint carries no
/// further auth.
async fn get_token(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenIdQuery>,
) -> Result<Json<Token>> {
    let id = id_exact(query.id.as_deref(), TOKEN_ID_LENGTH)
        .ok_or_else(|| AppError::InvalidInput("id".to_string()))?;

    let token: Token = state
        .store
        .read(collections::TOKENS, &id)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => AppError::NotFound("Token not found".to_string()),
            other => other.into(),
        })?;

    Ok(Json(token))
}

// ─── Update (extend) ─────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExtendTokenRequest {
    id: Option<String>,
    extend: Option<bool>,
}

/// Extend a live token by one session duration. The payload must carry
/// `extend: true` explicitly.
async fn update_token(
    State(state): State<Arc<AppState>>,
    Lenient(req): Lenient<ExtendTokenRequest>,
) -> Result<Json<serde_json::Value>> {
    let id = id_exact(req.id.as_deref(), TOKEN_ID_LENGTH);

    let Some(id) = id.filter(|_| req.extend == Some(true)) else {
        return Err(AppError::InvalidInput("id, extend".to_string()));
    };

    state.tokens.extend(&id).await?;

    Ok(Json(json!({})))
}

// ─── Delete (logout) ─────────────────────────────────────────

/// Revoke a token.
async fn delete_token(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenIdQuery>,
) -> Result<Json<serde_json::Value>> {
    let id = id_exact(query.id.as_deref(), TOKEN_ID_LENGTH)
        .ok_or_else(|| AppError::InvalidInput("id".to_string()))?;

    state.tokens.revoke(&id).await?;

    Ok(Json(json!({})))
}
