// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `CompletionAdapter` with pre-configured
//! outcomes and records every request it receives.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use drafthelper_core::traits::adapter::PluginAdapter;
use drafthelper_core::traits::provider::CompletionAdapter;
use drafthelper_core::types::{
    AdapterType, CompletionRequest, CompletionResponse, HealthStatus,
};
use drafthelper_core::DraftHelperError;

/// One scripted outcome for a `complete` call.
#[derive(Debug, Clone)]
enum Scripted {
    Text(String),
    Failure(String),
}

/// A mock completion provider that returns pre-configured responses.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty,
/// a default "mock draft" text is returned. An optional latency makes every
/// call sleep before answering.
pub struct MockProvider {
    outcomes: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    completed: Arc<AtomicUsize>,
    latency: Duration,
}

impl MockProvider {
    /// Create a new mock provider with an empty response queue.
    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    /// Create a mock provider pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(
                responses.into_iter().map(Scripted::Text).collect(),
            )),
            requests: Arc::new(Mutex::new(Vec::new())),
            completed: Arc::new(AtomicUsize::new(0)),
            latency: Duration::ZERO,
        }
    }

    /// Delay every answer by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Queue a provider failure with the given message.
    pub async fn add_failure(&self, message: impl Into<String>) {
        self.outcomes
            .lock()
            .await
            .push_back(Scripted::Failure(message.into()));
    }

    /// Number of `complete` calls received so far.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// Number of `complete` calls that ran to the end, success or failure.
    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Every request received, oldest first.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_outcome(&self) -> Scripted {
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Scripted::Text("mock draft".to_string()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, DraftHelperError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), DraftHelperError> {
        Ok(())
    }
}

#[async_trait]
impl CompletionAdapter for MockProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, DraftHelperError> {
        let model = request.model.clone();
        self.requests.lock().await.push(request);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let outcome = self.next_outcome().await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        match outcome {
            Scripted::Text(content) => Ok(CompletionResponse {
                content,
                model,
                finish_reason: Some("stop".to_string()),
            }),
            Scripted::Failure(message) => Err(DraftHelperError::provider(message)),
        }
    }
}
