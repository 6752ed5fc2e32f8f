// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User account routes.

use crate::crypto;
use crate::error::{AppError, Result};
use crate::extract::Lenient;
use crate::models::User;
use crate::routes::{non_empty, phone_exact, token_header, PHONE_LENGTH};
use crate::store::{collections, StoreError};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/users",
        post(create_user)
            .get(get_user)
            .put(update_user)
            .delete(delete_user),
    )
}

// ─── Create ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CreateUserRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
    password: Option<String>,
    tos_agreement: Option<bool>,
}

/// Sign up a new user. The phone number is the primary key, so the
/// store's exclusive create is what enforces one account per phone.
async fn create_user(
    State(state): State<Arc<AppState>>,
    Lenient(req): Lenient<CreateUserRequest>,
) -> Result<Json<serde_json::Value>> {
    let first_name = non_empty(req.first_name.as_deref());
    let last_name = non_empty(req.last_name.as_deref());
    let phone = non_empty(req.phone.as_deref()).filter(|p| p.len() >= PHONE_LENGTH);
    let password = non_empty(req.password.as_deref());
    let tos_agreement = req.tos_agreement == Some(true);

    let (Some(first_name), Some(last_name), Some(phone), Some(password)) =
        (first_name, last_name, phone, password)
    else {
        return Err(AppError::InvalidInput(
            "firstName, lastName, phone, password, tosAgreement".to_string(),
        ));
    };
    if !tos_agreement {
        return Err(AppError::InvalidInput(
            "firstName, lastName, phone, password, tosAgreement".to_string(),
        ));
    }

    let user = User {
        first_name,
        last_name,
        phone: phone.clone(),
        hashed_password: crypto::hash_password(&state.config.hashing_secret, &password)?,
        tos_agreement,
        checks: Vec::new(),
    };

    state
        .store
        .create(collections::USERS, &phone, &user)
        .await
        .map_err(|e| match e {
            StoreError::AlreadyExists => {
                AppError::Conflict("A user with that phone number already exists".to_string())
            }
            other => other.into(),
        })?;

    tracing::info!(phone, "User created");

    Ok(Json(json!({})))
}

// ─── Read ────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct PhoneQuery {
    phone: Option<String>,
}

/// User record as returned to callers: the stored record minus the
/// password hash.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserResponse {
    first_name: String,
    last_name: String,
    phone: String,
    tos_agreement: bool,
    checks: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            tos_agreement: user.tos_agreement,
            checks: user.checks,
        }
    }
}

/// Get a user's own record.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PhoneQuery>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>> {
    let phone = phone_exact(query.phone.as_deref())
        .ok_or_else(|| AppError::InvalidInput("phone".to_string()))?;

    let token = token_header(&headers)?;
    state.tokens.verify(&token, &phone).await?;

    let user: User = state
        .store
        .read(collections::USERS, &phone)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => AppError::NotFound("User not found".to_string()),
            other => other.into(),
        })?;

    Ok(Json(user.into()))
}

// ─── Update ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct UpdateUserRequest {
    phone: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    password: Option<String>,
}

/// Update profile fields. Only the supplied fields change; everything
/// else in the stored record is preserved.
async fn update_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Lenient(req): Lenient<UpdateUserRequest>,
) -> Result<Json<serde_json::Value>> {
    let phone = phone_exact(req.phone.as_deref())
        .ok_or_else(|| AppError::InvalidInput("phone".to_string()))?;

    let first_name = non_empty(req.first_name.as_deref());
    let last_name = non_empty(req.last_name.as_deref());
    let password = non_empty(req.password.as_deref());

    if first_name.is_none() && last_name.is_none() && password.is_none() {
        return Err(AppError::InvalidInput(
            "at least one of firstName, lastName, password".to_string(),
        ));
    }

    let token = token_header(&headers)?;
    state.tokens.verify(&token, &phone).await?;

    let mut user: User = state
        .store
        .read(collections::USERS, &phone)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => AppError::NotFound("User not found".to_string()),
            other => other.into(),
        })?;

    if let Some(first_name) = first_name {
        user.first_name = first_name;
    }
    if let Some(last_name) = last_name {
        user.last_name = last_name;
    }
    if let Some(password) = password {
        user.hashed_password = crypto::hash_password(&state.config.hashing_secret, &password)?;
    }

    state
        .store
        .update(collections::USERS, &phone, &user)
        .await?;

    Ok(Json(json!({})))
}

// ─── Delete ──────────────────────────────────────────────────

/// Delete a user account.
// TODO: clean up the tokens and checks a deleted user leaves behind.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PhoneQuery>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>> {
    let phone = phone_exact(query.phone.as_deref())
        .ok_or_else(|| AppError::InvalidInput("phone".to_string()))?;

    let token = token_header(&headers)?;
    state.tokens.verify(&token, &phone).await?;

    state
        .store
        .delete(collections::USERS, &phone)
        .await
        .map_err(|e| match e {
            StoreError::NotFound => AppError::NotFound("User not found".to_string()),
            other => other.into(),
        })?;

    tracing::info!(phone, "User deleted");

    Ok(Json(json!({})))
}
