// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps [`DraftHelperError`] onto HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use drafthelper_core::DraftHelperError;
use tracing::{error, warn};

use crate::handlers::ErrorResponse;

/// Error returned by every gateway handler.
#[derive(Debug)]
pub struct ApiError(pub DraftHelperError);

impl ApiError {
    /// Caller mistakes are 422, everything else is 500.
    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<DraftHelperError> for ApiError {
    fn from(err: DraftHelperError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(DraftHelperError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "request rejected");
        }
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
