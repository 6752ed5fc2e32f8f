// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token lifecycle, built on the `tokens` collection.
//!
//! Tokens are opaque random ids bound to a phone number and an absolute
//! expiry instant. Every protected operation goes through [`TokenService::
//! verify`] (or [`TokenService::resolve`]) before touching anything else.

use chrono::{Duration, Utc};

use crate::crypto;
use crate::error::{AppError, Result};
use crate::models::token::TOKEN_ID_LENGTH;
use crate::models::{Token, User};
use crate::store::{collections, FileStore, StoreError};

/// Issues, verifies, extends and revokes session tokens.
#[derive(Clone)]
pub struct TokenService {
    store: FileStore,
    hashing_secret: String,
    session_duration: Duration,
}

impl TokenService {
    pub fn new(store: FileStore, hashing_secret: String, session_duration_secs: i64) -> Self {
        Self {
            store,
            hashing_secret,
            session_duration: Duration::seconds(session_duration_secs),
        }
    }

    /// Issue a fresh token for `phone` after checking the password
    /// against the stored hash.
    pub async fn issue(&self, phone: &str, password: &str) -> Result<Token> {
        let user: User = self
            .store
            .read(collections::USERS, phone)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => {
                    AppError::NotFound("Could not find the specified user".to_string())
                }
                other => other.into(),
            })?;

        let matches = crypto::verify_password(&self.hashing_secret, password, &user.hashed_password)?;
        if !matches {
            return Err(AppError::InvalidCredentials);
        }

        let token = Token {
            id: crypto::random_id(TOKEN_ID_LENGTH)?,
            phone: phone.to_string(),
            expires: self.expiry_from_now(),
        };

        self.store
            .create(collections::TOKENS, &token.id, &token)
            .await?;

        tracing::debug!(phone, token = %token.id, "Token issued");

        Ok(token)
    }

    /// Check that `token_id` is a live token bound to `phone`.
    ///
    /// Any failure (absent token, phone mismatch, expiry) collapses into
    /// `Unauthorized` so callers cannot distinguish the cases.
    pub async fn verify(&self, token_id: &str, phone: &str) -> Result<()> {
        let token = self.resolve(token_id).await?;

        if token.phone != phone {
            return Err(AppError::Unauthorized);
        }

        Ok(())
    }

    /// Look up a live (unexpired) token, failing with `Unauthorized`
    /// otherwise. Used where the token itself names the acting identity.
    pub async fn resolve(&self, token_id: &str) -> Result<Token> {
        let token: Token = self
            .store
            .read(collections::TOKENS, token_id)
            .await
            .map_err(|_| AppError::Unauthorized)?;

        if token.is_expired() {
            return Err(AppError::Unauthorized);
        }

        Ok(token)
    }

    /// Push a live token's expiry out by one session duration.
    /// Already-expired tokens cannot be revived.
    pub async fn extend(&self, token_id: &str) -> Result<()> {
        let mut token: Token = self
            .store
            .read(collections::TOKENS, token_id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => {
                    AppError::NotFound("Specified token does not exist".to_string())
                }
                other => other.into(),
            })?;

        if token.is_expired() {
            return Err(AppError::TokenExpired);
        }

        token.expires = self.expiry_from_now();

        self.store
            .update(collections::TOKENS, token_id, &token)
            .await?;

        Ok(())
    }

    /// Delete a token.
    pub async fn revoke(&self, token_id: &str) -> Result<()> {
        self.store
            .delete(collections::TOKENS, token_id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => {
                    AppError::NotFound("Specified token does not exist".to_string())
                }
                other => other.into(),
            })
    }

    fn expiry_from_now(&self) -> i64 {
        (Utc::now() + self.session_duration).timestamp_millis()
    }
}
