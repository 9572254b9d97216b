// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Draft generation service.
//!
//! Each call runs one request through a fixed pipeline: validate, build the
//! prompt, call the provider once, persist one row, return it. A failed
//! completion call writes nothing.

use std::sync::Arc;

use drafthelper_core::{
    CompletionAdapter, CompletionRequest, DraftEntry, DraftHelperError, DraftKind, DraftStore,
    NewDraft,
};
use tracing::{debug, info, warn, Instrument};

use crate::prompts;

/// Pipeline stage of a single draft request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    /// Inputs accepted.
    Received,
    /// Template filled in.
    PromptBuilt,
    /// Waiting on the completion provider.
    Completing,
    /// Row written to the store.
    Persisted,
    /// Entry handed back to the caller.
    Responded,
    /// Completion or persistence failed.
    Errored,
}

impl std::fmt::Display for DraftState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftState::Received => write!(f, "received"),
            DraftState::PromptBuilt => write!(f, "prompt_built"),
            DraftState::Completing => write!(f, "completing"),
            DraftState::Persisted => write!(f, "persisted"),
            DraftState::Responded => write!(f, "responded"),
            DraftState::Errored => write!(f, "errored"),
        }
    }
}

/// Generates email and post drafts and keeps their history.
///
/// Cheap to clone; the provider and store are shared handles.
#[derive(Clone)]
pub struct DraftService {
    provider: Arc<dyn CompletionAdapter>,
    store: Arc<dyn DraftStore>,
    model: String,
}

impl DraftService {
    /// Creates a service that sends every request to `model`.
    pub fn new(
        provider: Arc<dyn CompletionAdapter>,
        store: Arc<dyn DraftStore>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            store,
            model: model.into(),
        }
    }

    /// The model name sent with every completion request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Shared handle to the draft store.
    pub fn store(&self) -> &Arc<dyn DraftStore> {
        &self.store
    }

    /// Generates a polite email for `to` about `subject` covering `key_points`.
    ///
    /// The stored draft's context is the subject.
    pub async fn generate_email_draft(
        &self,
        to: &str,
        subject: &str,
        key_points: &str,
    ) -> Result<DraftEntry, DraftHelperError> {
        require_text("to", to)?;
        require_text("subject", subject)?;
        require_text("key_points", key_points)?;
        transition(DraftKind::Email, DraftState::Received);

        let prompt = prompts::email_prompt(to, subject, key_points);
        self.generate(
            DraftKind::Email,
            subject,
            prompts::EMAIL_SYSTEM_INSTRUCTION,
            prompt,
        )
        .await
    }

    /// Generates a social post about `topic` using `keywords`.
    ///
    /// The stored draft's context is the topic.
    pub async fn generate_post_draft(
        &self,
        topic: &str,
        keywords: &str,
    ) -> Result<DraftEntry, DraftHelperError> {
        require_text("topic", topic)?;
        require_text("keywords", keywords)?;
        transition(DraftKind::Post, DraftState::Received);

        let prompt = prompts::post_prompt(topic, keywords);
        self.generate(
            DraftKind::Post,
            topic,
            prompts::POST_SYSTEM_INSTRUCTION,
            prompt,
        )
        .await
    }

    /// Every stored draft, newest first.
    pub async fn list_drafts(&self) -> Result<Vec<DraftEntry>, DraftHelperError> {
        self.store.list_drafts().await
    }

    /// Runs the completion and the insert on a detached task.
    ///
    /// Dropping the returned future (client disconnect, request timeout)
    /// does not cancel either step: the spent completion is still stored.
    async fn generate(
        &self,
        kind: DraftKind,
        context: &str,
        system_instruction: &str,
        prompt: String,
    ) -> Result<DraftEntry, DraftHelperError> {
        transition(kind, DraftState::PromptBuilt);

        let request = CompletionRequest {
            model: self.model.clone(),
            system_instruction: system_instruction.to_string(),
            user_prompt: prompt,
        };
        let provider = Arc::clone(&self.provider);
        let store = Arc::clone(&self.store);
        let context = context.to_string();

        let task = tokio::spawn(
            async move {
                transition(kind, DraftState::Completing);
                let completion = match provider.complete(request).await {
                    Ok(completion) => completion,
                    Err(e) => {
                        transition(kind, DraftState::Errored);
                        warn!(%kind, error = %e, "completion failed, nothing stored");
                        return Err(e);
                    }
                };

                let draft = NewDraft {
                    kind,
                    context,
                    body: completion.content,
                };
                let entry = match store.insert_draft(&draft).await {
                    Ok(entry) => entry,
                    Err(e) => {
                        transition(kind, DraftState::Errored);
                        return Err(e);
                    }
                };
                transition(kind, DraftState::Persisted);
                info!(%kind, id = entry.id, model = %completion.model, "draft generated");
                Ok(entry)
            }
            .in_current_span(),
        );

        let entry = task
            .await
            .map_err(|e| DraftHelperError::Internal(format!("draft task failed: {e}")))??;
        transition(kind, DraftState::Responded);
        Ok(entry)
    }
}

fn transition(kind: DraftKind, state: DraftState) {
    debug!(%kind, %state, "draft state");
}

/// Rejects a blank (empty or whitespace-only) request field.
pub fn require_text(field: &str, value: &str) -> Result<(), DraftHelperError> {
    if value.trim().is_empty() {
        return Err(DraftHelperError::Validation(format!(
            "field `{field}` must not be empty"
        )));
    }
    Ok(())
}
