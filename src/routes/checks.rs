// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Check (monitoring target) routes.
//!
//! Ownership is always taken from the token, never from the payload: the
//! phone bound to the presented token decides which user a check belongs
//! to or who may read, change and delete it.

use crate::crypto;
use crate::error::{AppError, Result};
use crate::extract::Lenient;
use crate::models::check::{CHECK_ID_LENGTH, TIMEOUT_RANGE};
use crate::models::{Check, CheckMethod, Protocol, User};
use crate::routes::{id_exact, non_empty, token_header};
use crate::store::{collections, StoreError};
use crate::AppState;
use anyhow::anyhow;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/checks",
        post(create_check)
            .get(get_check)
            .put(update_check)
            .delete(delete_check),
    )
}

// ─── Create ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CreateCheckRequest {
    protocol: Option<String>,
    url: Option<String>,
    method: Option<String>,
    success_codes: Option<Vec<u16>>,
    timeout_seconds: Option<u8>,
}

/// Create a check for the authenticated user.
///
/// The check document is written first and the owner's check list second;
/// there is no rollback, so a failure on the second write leaves an
/// orphaned check not referenced by its owner.
async fn create_check(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Lenient(req): Lenient<CreateCheckRequest>,
) -> Result<Json<Check>> {
    let protocol = req.protocol.as_deref().and_then(|p| p.parse::<Protocol>().ok());
    let url = non_empty(req.url.as_deref());
    let method = req.method.as_deref().and_then(|m| m.parse::<CheckMethod>().ok());
    let success_codes = req.success_codes.filter(|codes| !codes.is_empty());
    let timeout_seconds = req.timeout_seconds.filter(|t| TIMEOUT_RANGE.contains(t));

    let (Some(protocol), Some(url), Some(method), Some(success_codes), Some(timeout_seconds)) =
        (protocol, url, method, success_codes, timeout_seconds)
    else {
        return Err(AppError::InvalidInput(
            "protocol, url, method, successCodes, timeoutSeconds".to_string(),
        ));
    };

    let token_id = token_header(&headers)?;
    let token = state.tokens.resolve(&token_id).await?;

    // A token whose user is gone is as good as no token.
    let mut user: User = state
        .store
        .read(collections::USERS, &token.phone)
        .await
        .map_err(|_| AppError::Unauthorized)?;

    if user.checks.len() >= state.config.max_checks {
        return Err(AppError::QuotaExceeded(state.config.max_checks));
    }

    let check = Check {
        id: crypto::random_id(CHECK_ID_LENGTH)?,
        user_phone: token.phone.clone(),
        protocol,
        url,
        method,
        success_codes,
        timeout_seconds,
    };

    state
        .store
        .create(collections::CHECKS, &check.id, &check)
        .await?;

    user.checks.push(check.id.clone());
    state
        .store
        .update(collections::USERS, &token.phone, &user)
        .await?;

    tracing::info!(phone = %token.phone, check = %check.id, "Check created");

    Ok(Json(check))
}

// ─── Read ────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct CheckIdQuery {
    id: Option<String>,
}

/// Get a check the caller owns.
async fn get_check(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CheckIdQuery>,
    headers: HeaderMap,
) -> Result<Json<Check>> {
    let id = id_exact(query.id.as_deref(), CHECK_ID_LENGTH)
        .ok_or_else(|| AppError::InvalidInput("id".to_string()))?;

    let check: Check = state
        .store
        .read(collections::CHECKS, &id)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => AppError::NotFound("Check not found".to_string()),
            other => other.into(),
        })?;

    let token = token_header(&headers)?;
    state.tokens.verify(&token, &check.user_phone).await?;

    Ok(Json(check))
}

// ─── Update ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct UpdateCheckRequest {
    id: Option<String>,
    protocol: Option<String>,
    url: Option<String>,
    method: Option<String>,
    success_codes: Option<Vec<u16>>,
    timeout_seconds: Option<u8>,
}

/// Change one or more fields of an owned check. A supplied value that
/// fails validation counts as not supplied at all.
async fn update_check(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Lenient(req): Lenient<UpdateCheckRequest>,
) -> Result<Json<serde_json::Value>> {
    let id = id_exact(req.id.as_deref(), CHECK_ID_LENGTH)
        .ok_or_else(|| AppError::InvalidInput("id".to_string()))?;

    let protocol = req.protocol.as_deref().and_then(|p| p.parse::<Protocol>().ok());
    let url = non_empty(req.url.as_deref());
    let method = req.method.as_deref().and_then(|m| m.parse::<CheckMethod>().ok());
    let success_codes = req.success_codes.filter(|codes| !codes.is_empty());
    let timeout_seconds = req.timeout_seconds.filter(|t| TIMEOUT_RANGE.contains(t));

    if protocol.is_none()
        && url.is_none()
        && method.is_none()
        && success_codes.is_none()
        && timeout_seconds.is_none()
    {
        return Err(AppError::InvalidInput(
            "at least one of protocol, url, method, successCodes, timeoutSeconds".to_string(),
        ));
    }

    let mut check: Check = state
        .store
        .read(collections::CHECKS, &id)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => AppError::NotFound("Check not found".to_string()),
            other => other.into(),
        })?;

    let token = token_header(&headers)?;
    state.tokens.verify(&token, &check.user_phone).await?;

    if let Some(protocol) = protocol {
        check.protocol = protocol;
    }
    if let Some(url) = url {
        check.url = url;
    }
    if let Some(method) = method {
        check.method = method;
    }
    if let Some(success_codes) = success_codes {
        check.success_codes = success_codes;
    }
    if let Some(timeout_seconds) = timeout_seconds {
        check.timeout_seconds = timeout_seconds;
    }

    state.store.update(collections::CHECKS, &id, &check).await?;

    Ok(Json(json!({})))
}

// ─── Delete ──────────────────────────────────────────────────

/// Delete an owned check and detach it from the owner's check list.
async fn delete_check(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CheckIdQuery>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>> {
    let id = id_exact(query.id.as_deref(), CHECK_ID_LENGTH)
        .ok_or_else(|| AppError::InvalidInput("id".to_string()))?;

    let check: Check = state
        .store
        .read(collections::CHECKS, &id)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => AppError::NotFound("Check not found".to_string()),
            other => other.into(),
        })?;

    let token = token_header(&headers)?;
    state.tokens.verify(&token, &check.user_phone).await?;

    state.store.delete(collections::CHECKS, &id).await?;

    let mut user: User = state
        .store
        .read(collections::USERS, &check.user_phone)
        .await
        .map_err(|_| {
            AppError::Internal(anyhow!(
                "owner record missing while detaching check {id} from {}",
                check.user_phone
            ))
        })?;

    user.checks.retain(|owned| owned != &id);
    state
        .store
        .update(collections::USERS, &check.user_phone, &user)
        .await?;

    tracing::info!(phone = %check.user_phone, check = %id, "Check deleted");

    Ok(Json(json!({})))
}
