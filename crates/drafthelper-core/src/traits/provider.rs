// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion adapter trait for LLM providers.

use async_trait::async_trait;

use crate::error::DraftHelperError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for a chat-style text completion provider.
///
/// Implementations issue exactly one remote call per [`complete`](Self::complete)
/// and never retry. Any failure, including a response without usable text,
/// is reported as [`DraftHelperError::Provider`].
#[async_trait]
pub trait CompletionAdapter: PluginAdapter {
    /// Sends the request and returns the first choice's text.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, DraftHelperError>;
}
