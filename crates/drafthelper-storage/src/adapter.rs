// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the DraftStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use drafthelper_config::model::StorageConfig;
use drafthelper_core::{
    AdapterType, DraftEntry, DraftHelperError, DraftStore, HealthStatus, NewDraft, PluginAdapter,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed draft store.
///
/// The database is opened by [`DraftStore::initialize`]; every other
/// operation fails with a storage error until then.
pub struct SqliteDraftStore {
    config: StorageConfig,
    read_only: bool,
    db: OnceCell<Database>,
}

impl SqliteDraftStore {
    /// Create a store for the configured database file without opening it.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            read_only: false,
            db: OnceCell::new(),
        }
    }

    /// Create a store that opens an existing database read-only.
    ///
    /// Initializing fails when the file does not exist; inserts fail
    /// with a storage error.
    pub fn read_only(config: StorageConfig) -> Self {
        Self {
            read_only: true,
            ..Self::new(config)
        }
    }

    /// Returns the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, DraftHelperError> {
        self.db.get().ok_or_else(|| DraftHelperError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteDraftStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, DraftHelperError> {
        self.db()?
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), DraftHelperError> {
        if let Some(db) = self.db.get()
            && !self.read_only
        {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl DraftStore for SqliteDraftStore {
    async fn initialize(&self) -> Result<(), DraftHelperError> {
        let db = if self.read_only {
            Database::open_read_only(&self.config.database_path).await?
        } else {
            Database::open_with(&self.config.database_path, self.config.wal_mode).await?
        };
        self.db.set(db).map_err(|_| DraftHelperError::Storage {
            source: "storage already initialized".into(),
        })?;
        info!(path = %self.config.database_path, "draft store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), DraftHelperError> {
        let db = self.db()?.clone();
        if self.read_only {
            db.close_without_checkpoint().await?;
        } else {
            db.close().await?;
        }
        debug!(path = %self.config.database_path, "draft store closed");
        Ok(())
    }

    async fn insert_draft(&self, draft: &NewDraft) -> Result<DraftEntry, DraftHelperError> {
        let entry = queries::drafts::insert_draft(self.db()?, draft).await?;
        debug!(id = entry.id, kind = %entry.kind, "draft stored");
        Ok(entry)
    }

    async fn list_drafts(&self) -> Result<Vec<DraftEntry>, DraftHelperError> {
        queries::drafts::list_drafts(self.db()?).await
    }
}
