// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` pairs a [`MockProvider`] with an initialized SQLite draft
//! store living in a temp directory. The directory is removed on drop.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use drafthelper_config::model::{DraftHelperConfig, StorageConfig};
use drafthelper_core::{DraftHelperError, DraftStore};
use drafthelper_storage::SqliteDraftStore;

use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    model: Option<String>,
    latency: Duration,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            model: None,
            latency: Duration::ZERO,
        }
    }

    /// Set mock provider responses.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Override the configured model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Make the mock provider sleep this long before every answer.
    pub fn with_provider_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Build the harness, creating and initializing the temp store.
    pub async fn build(self) -> Result<TestHarness, DraftHelperError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| DraftHelperError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("drafts.db");

        let storage_config = StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        };
        let store = SqliteDraftStore::new(storage_config.clone());
        store.initialize().await?;

        let mut config = DraftHelperConfig {
            storage: storage_config,
            ..DraftHelperConfig::default()
        };
        if let Some(model) = self.model {
            config.provider.model = model;
        }

        Ok(TestHarness {
            mock_provider: Arc::new(
                MockProvider::with_responses(self.responses).with_latency(self.latency),
            ),
            store: Arc::new(store),
            config,
            db_path,
            _temp_dir: temp_dir,
        })
    }
}

/// A test environment with a mock provider and a temp draft store.
pub struct TestHarness {
    /// The mock completion provider.
    pub mock_provider: Arc<MockProvider>,
    /// Initialized SQLite draft store.
    pub store: Arc<SqliteDraftStore>,
    /// Configuration pointing at the temp database.
    pub config: DraftHelperConfig,
    /// Path of the temp database file.
    pub db_path: PathBuf,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Model name requests are expected to carry.
    pub fn model(&self) -> &str {
        &self.config.provider.model
    }
}
