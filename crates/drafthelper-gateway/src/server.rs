// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::time::{Duration, Instant};

use axum::{
    routing::{get, post},
    Router,
};
use drafthelper_config::model::ServerConfig;
use drafthelper_core::DraftHelperError;
use drafthelper_drafts::DraftService;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Draft generation and history.
    pub service: DraftService,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(service: DraftService) -> Self {
        Self {
            service,
            start_time: Instant::now(),
        }
    }
}

/// Builds the gateway router.
///
/// Requests running longer than `request_timeout` are answered with 408.
pub fn build_router(state: GatewayState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(handlers::get_index))
        .route("/health", get(handlers::get_health))
        .route("/draft/email", post(handlers::post_email_draft))
        .route("/draft/post", post(handlers::post_post_draft))
        .route("/drafts", get(handlers::get_drafts))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host:port and serves until `shutdown` is
/// cancelled, letting in-flight requests finish.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), DraftHelperError> {
    let app = build_router(state, Duration::from_secs(config.request_timeout_secs));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| DraftHelperError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| DraftHelperError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}
