// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management: PRAGMA setup, schema bootstrap, close.
//!
//! All statements run on tokio-rusqlite's single background thread, which
//! also serializes concurrent writers. Do NOT open a second connection for
//! writes.

use drafthelper_core::DraftHelperError;
use tracing::debug;

use crate::schema::CREATE_SCHEMA;

/// Convert a tokio-rusqlite error into `DraftHelperError::Storage`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> DraftHelperError {
    DraftHelperError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the drafts database.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if necessary) the database at `path` in WAL mode.
    pub async fn open(path: &str) -> Result<Self, DraftHelperError> {
        Self::open_with(path, true).await
    }

    /// Open the database, choosing the journal mode explicitly.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, DraftHelperError> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| DraftHelperError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| DraftHelperError::Storage {
                source: Box::new(e),
            })?;

        let journal = if wal_mode { "WAL" } else { "DELETE" };
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            let _mode: String =
                conn.pragma_update_and_check(None, "journal_mode", journal, |row| row.get(0))?;
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.busy_timeout(std::time::Duration::from_secs(5))?;
            conn.execute_batch(CREATE_SCHEMA)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, journal, "database opened");
        Ok(Self { conn })
    }

    /// Open an existing database without creating, migrating or writing it.
    pub async fn open_read_only(path: &str) -> Result<Self, DraftHelperError> {
        let flags = rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY
            | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX
            | rusqlite::OpenFlags::SQLITE_OPEN_URI;
        let conn = tokio_rusqlite::Connection::open_with_flags(path, flags)
            .await
            .map_err(|e| DraftHelperError::Storage {
                source: Box::new(e),
            })?;

        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.busy_timeout(std::time::Duration::from_secs(5))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, "database opened read-only");
        Ok(Self { conn })
    }

    /// Returns the underlying connection for query modules.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL so the main database file is self-contained.
    pub async fn checkpoint(&self) -> Result<(), DraftHelperError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    /// Checkpoint and close the connection.
    pub async fn close(self) -> Result<(), DraftHelperError> {
        self.checkpoint().await?;
        self.close_without_checkpoint().await
    }

    /// Close the connection as is. Every clone of this handle stops working.
    pub async fn close_without_checkpoint(self) -> Result<(), DraftHelperError> {
        self.conn.close().await.map_err(|e| DraftHelperError::Storage {
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schema.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();

        let tables: Vec<String> = db
            .connection()
            .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt =
                    conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                rows.collect()
            })
            .await
            .unwrap();
        assert!(tables.contains(&"drafts".to_string()));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn reopening_keeps_existing_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reopen.db");
        let path = path.to_str().unwrap();

        Database::open(path).await.unwrap().close().await.unwrap();
        Database::open(path).await.unwrap().close().await.unwrap();
    }

    #[tokio::test]
    async fn open_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/drafts.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        assert!(path.exists());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn read_only_open_never_creates_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let result = Database::open_read_only(path.to_str().unwrap()).await;
        assert!(matches!(result, Err(DraftHelperError::Storage { .. })));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn read_only_open_rejects_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ro.db");
        let path = path.to_str().unwrap();
        Database::open(path).await.unwrap().close().await.unwrap();

        let db = Database::open_read_only(path).await.unwrap();
        let result = db
            .connection()
            .call(|conn| -> Result<usize, rusqlite::Error> {
                conn.execute(
                    "INSERT INTO drafts (type, context, body, created_at) VALUES ('Post', 'c', 'b', 't')",
                    [],
                )
            })
            .await;
        assert!(result.is_err());
        db.close_without_checkpoint().await.unwrap();
    }

    #[tokio::test]
    async fn open_fails_on_unusable_path() {
        let dir = tempdir().unwrap();
        // A directory cannot be opened as a database file.
        let result = Database::open(dir.path().to_str().unwrap()).await;
        assert!(matches!(result, Err(DraftHelperError::Storage { .. })));
    }
}
