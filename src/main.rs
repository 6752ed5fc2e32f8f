// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Uptime-Tracker API Server
//!
//! Serves the users/tokens/checks JSON API on top of a flat-file
//! document store.

use axum::ServiceExt;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uptime_tracker::{
    config::Config, routes::create_router, services::TokenService, store::FileStore, AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        env = %config.env_name,
        "Starting Uptime-Tracker API"
    );

    // Open the document store (creates collection directories)
    let store = FileStore::open(&config.data_dir)
        .await
        .expect("Failed to open document store");

    let tokens = TokenService::new(
        store.clone(),
        config.hashing_secret.clone(),
        config.session_duration_secs,
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        tokens,
    });

    // Build router; trailing slashes are trimmed before routing so
    // `/users/` and `/users` hit the same handler.
    let app = NormalizePathLayer::trim_trailing_slash().layer(create_router(state));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, ServiceExt::<axum::extract::Request>::into_make_service(app)).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("uptime_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
