// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for drafthelper.

use thiserror::Error;

/// The error type shared by every drafthelper crate.
#[derive(Debug, Error)]
pub enum DraftHelperError {
    /// Configuration errors (missing credential, invalid header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller supplied a malformed or incomplete request.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Storage backend errors (open, schema bootstrap, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Completion provider errors (transport, error status, unusable response).
    #[error("generation failed: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DraftHelperError {
    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true when the error was caused by the caller, not the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
