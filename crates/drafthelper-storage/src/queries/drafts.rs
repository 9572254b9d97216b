// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Draft insert and listing.

use std::str::FromStr;

use drafthelper_core::{DraftEntry, DraftHelperError, DraftKind, NewDraft};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// Millisecond-precision UTC timestamp in the stored format.
fn now_timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

fn row_to_draft(row: &rusqlite::Row<'_>) -> rusqlite::Result<DraftEntry> {
    let kind: String = row.get(1)?;
    let kind = DraftKind::from_str(&kind).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(DraftEntry {
        id: row.get(0)?,
        kind,
        context: row.get(2)?,
        body: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Insert a draft and return it with its assigned id and timestamp.
pub async fn insert_draft(db: &Database, draft: &NewDraft) -> Result<DraftEntry, DraftHelperError> {
    let draft = draft.clone();
    db.connection()
        .call(move |conn| -> Result<DraftEntry, rusqlite::Error> {
            let created_at = now_timestamp();
            conn.execute(
                "INSERT INTO drafts (type, context, body, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![draft.kind.to_string(), draft.context, draft.body, created_at],
            )?;
            Ok(DraftEntry {
                id: conn.last_insert_rowid(),
                kind: draft.kind,
                context: draft.context,
                body: draft.body,
                created_at,
            })
        })
        .await
        .map_err(map_tr_err)
}

/// List every draft, newest first. Equal timestamps fall back to id order.
pub async fn list_drafts(db: &Database) -> Result<Vec<DraftEntry>, DraftHelperError> {
    db.connection()
        .call(|conn| -> Result<Vec<DraftEntry>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, type, context, body, created_at
                 FROM drafts ORDER BY created_at DESC, id DESC",
            )?;
            let rows = stmt.query_map([], row_to_draft)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}
