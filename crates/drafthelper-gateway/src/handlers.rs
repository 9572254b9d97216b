// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Handles GET /, GET /health, POST /draft/email, POST /draft/post and
//! GET /drafts.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use drafthelper_core::{DraftEntry, DraftHelperError, HealthStatus, PluginAdapter};
use drafthelper_drafts::require_text;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::server::GatewayState;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Request body for POST /draft/email.
#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    /// Recipient description, e.g. "Коллега".
    pub to: String,
    /// Email subject; stored as the draft context.
    pub subject: String,
    /// Points the email must cover.
    pub key_points: String,
}

/// Request body for POST /draft/post.
#[derive(Debug, Deserialize)]
pub struct PostRequest {
    /// Post topic; stored as the draft context.
    pub topic: String,
    /// Keywords to weave into the post.
    pub keywords: String,
}

impl EmailRequest {
    fn validate(&self) -> Result<(), DraftHelperError> {
        require_text("to", &self.to)?;
        require_text("subject", &self.subject)?;
        require_text("key_points", &self.key_points)
    }
}

impl PostRequest {
    fn validate(&self) -> Result<(), DraftHelperError> {
        require_text("topic", &self.topic)?;
        require_text("keywords", &self.keywords)
    }
}

/// Response body for GET /health.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy", "degraded" or "unhealthy".
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the gateway started.
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// GET /
pub async fn get_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health
///
/// Reports the draft store's health. Unhealthy storage answers 503.
pub async fn get_health(State(state): State<GatewayState>) -> Response {
    let status = match state.service.store().health_check().await {
        Ok(HealthStatus::Healthy) => "healthy",
        Ok(HealthStatus::Degraded(reason)) => {
            tracing::warn!(%reason, "storage degraded");
            "degraded"
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            tracing::warn!(%reason, "storage unhealthy");
            "unhealthy"
        }
        Err(e) => {
            tracing::warn!(error = %e, "storage health check failed");
            "unhealthy"
        }
    };

    let code = if status == "unhealthy" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_secs: state.start_time.elapsed().as_secs(),
        }),
    )
        .into_response()
}

/// POST /draft/email
pub async fn post_email_draft(
    State(state): State<GatewayState>,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<DraftEntry>, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let entry = state
        .service
        .generate_email_draft(&req.to, &req.subject, &req.key_points)
        .await?;
    Ok(Json(entry))
}

/// POST /draft/post
pub async fn post_post_draft(
    State(state): State<GatewayState>,
    payload: Result<Json<PostRequest>, JsonRejection>,
) -> Result<Json<DraftEntry>, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let entry = state
        .service
        .generate_post_draft(&req.topic, &req.keywords)
        .await?;
    Ok(Json(entry))
}

/// GET /drafts
///
/// Every stored draft, newest first.
pub async fn get_drafts(
    State(state): State<GatewayState>,
) -> Result<Json<Vec<DraftEntry>>, ApiError> {
    Ok(Json(state.service.list_drafts().await?))
}
