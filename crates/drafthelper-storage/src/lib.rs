// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for generated drafts.
//!
//! A single `drafts` table, created on open when absent, written through the
//! one background thread of a `tokio-rusqlite` connection.

pub mod adapter;
pub mod database;
pub mod queries;
pub mod schema;

pub use adapter::SqliteDraftStore;
pub use database::Database;
