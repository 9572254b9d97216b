// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for drafthelper.
//!
//! Holds the error type, the draft data model, and the adapter traits that
//! the storage and completion crates implement. The draft service and the
//! HTTP gateway only ever talk to these traits.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::DraftHelperError;
pub use types::{
    AdapterType, CompletionRequest, CompletionResponse, DraftEntry, DraftKind, HealthStatus,
    NewDraft,
};

pub use traits::{CompletionAdapter, DraftStore, PluginAdapter};
