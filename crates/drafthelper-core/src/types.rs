// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of an adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Storage,
}

// --- Draft types ---

/// The kind of text a draft holds.
///
/// Stored and serialized as the bare variant name (`"Email"`, `"Post"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum DraftKind {
    Email,
    Post,
}

/// A persisted draft, as returned by the store and sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftEntry {
    /// Store-assigned identifier, strictly increasing.
    pub id: i64,
    /// Draft kind, serialized under the `type` key.
    #[serde(rename = "type")]
    pub kind: DraftKind,
    /// Email subject or post topic supplied by the caller.
    pub context: String,
    /// Generated text.
    pub body: String,
    /// ISO 8601 UTC creation timestamp with millisecond precision.
    pub created_at: String,
}

/// A draft that has been generated but not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDraft {
    pub kind: DraftKind,
    pub context: String,
    pub body: String,
}

// --- Completion types ---

/// A single-shot completion request: one system instruction, one user prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Model identifier understood by the provider.
    pub model: String,
    /// Instruction sent as the system message.
    pub system_instruction: String,
    /// Prompt sent as the user message.
    pub user_prompt: String,
}

/// The text produced by a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Text content of the first choice.
    pub content: String,
    /// Model that actually served the request.
    pub model: String,
    /// Provider-reported finish reason, if any.
    pub finish_reason: Option<String>,
}
