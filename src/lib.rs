// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Uptime-Tracker: JSON API for user accounts, session tokens and
//! monitoring checks.
//!
//! This crate provides the backend API: a flat-file JSON document store,
//! token-based authentication, and method-dispatched resource handlers
//! for users, tokens and checks.

pub mod config;
pub mod crypto;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use config::Config;
use services::TokenService;
use store::FileStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: FileStore,
    pub tokens: TokenService,
}
