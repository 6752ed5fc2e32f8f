// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Best-effort JSON body extraction.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use std::convert::Infallible;

/// JSON body extractor that never rejects the request.
///
/// A missing, empty or malformed body deserializes to `T::default()`,
/// so handlers report the problem as a validation failure on the fields
/// they actually require instead of a transport-level error.
pub struct Lenient<T>(pub T);

impl<S, T> FromRequest<S> for Lenient<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.unwrap_or_default();

        Ok(Lenient(serde_json::from_slice(&bytes).unwrap_or_default()))
    }
}
