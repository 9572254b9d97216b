// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for draft persistence.

use async_trait::async_trait;

use crate::error::DraftHelperError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{DraftEntry, NewDraft};

/// Append-only store of generated drafts.
///
/// There is no update or delete: a draft is written once,
/// after its completion call succeeded, and kept forever.
#[async_trait]
pub trait DraftStore: PluginAdapter {
    /// Opens the backend and creates the schema if absent.
    async fn initialize(&self) -> Result<(), DraftHelperError>;

    /// Flushes pending writes and closes the backend; later calls fail.
    async fn close(&self) -> Result<(), DraftHelperError>;

    /// Inserts a draft, assigning its id and creation timestamp.
    async fn insert_draft(&self, draft: &NewDraft) -> Result<DraftEntry, DraftHelperError>;

    /// Lists every draft, newest first.
    async fn list_drafts(&self) -> Result<Vec<DraftEntry>, DraftHelperError>;
}
