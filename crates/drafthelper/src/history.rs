// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `drafthelper history`: prints stored drafts from the configured database.

use std::fmt::Write as _;
use std::path::Path;

use drafthelper_config::DraftHelperConfig;
use drafthelper_core::{DraftEntry, DraftHelperError, DraftStore};
use drafthelper_storage::SqliteDraftStore;

/// Prints stored drafts, newest first, truncated to `limit` when given.
pub async fn run_history(
    config: DraftHelperConfig,
    limit: Option<usize>,
    json: bool,
) -> Result<(), DraftHelperError> {
    let drafts = load_history(&config, limit).await?;
    print!("{}", render_history(&drafts, json)?);
    Ok(())
}

/// Reads drafts without creating or modifying the database.
///
/// A database file that does not exist yet simply has no drafts.
async fn load_history(
    config: &DraftHelperConfig,
    limit: Option<usize>,
) -> Result<Vec<DraftEntry>, DraftHelperError> {
    if !Path::new(&config.storage.database_path).exists() {
        return Ok(Vec::new());
    }

    let store = SqliteDraftStore::read_only(config.storage.clone());
    store.initialize().await?;
    let mut drafts = store.list_drafts().await?;
    store.close().await?;

    if let Some(limit) = limit {
        drafts.truncate(limit);
    }
    Ok(drafts)
}

/// Formats drafts as pretty JSON or as plain text blocks.
fn render_history(drafts: &[DraftEntry], json: bool) -> Result<String, DraftHelperError> {
    if json {
        let mut out = serde_json::to_string_pretty(drafts)
            .map_err(|e| DraftHelperError::Internal(format!("failed to encode drafts: {e}")))?;
        out.push('\n');
        return Ok(out);
    }

    if drafts.is_empty() {
        return Ok("no drafts yet\n".to_string());
    }

    let mut out = String::new();
    for draft in drafts {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "#{} [{}] {} ({})",
            draft.id, draft.kind, draft.context, draft.created_at
        );
        let _ = writeln!(out, "{}\n", draft.body.trim_end());
    }
    Ok(out)
}
