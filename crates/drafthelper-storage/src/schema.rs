// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Table definitions, applied idempotently on every open.

/// Creates the `drafts` table and its listing index if they do not exist.
pub const CREATE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS drafts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    type        TEXT NOT NULL,
    context     TEXT NOT NULL,
    body        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_drafts_created_at ON drafts (created_at DESC, id DESC);
";
