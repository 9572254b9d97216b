// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `drafthelper serve`: wires the store, provider and gateway together.

use std::sync::Arc;

use drafthelper_config::DraftHelperConfig;
use drafthelper_core::{DraftHelperError, DraftStore, PluginAdapter};
use drafthelper_drafts::DraftService;
use drafthelper_gateway::GatewayState;
use drafthelper_groq::GroqProvider;
use drafthelper_storage::SqliteDraftStore;
use tracing::{error, info};

use crate::shutdown;

/// Runs the HTTP server until SIGINT or SIGTERM.
pub async fn run_serve(config: DraftHelperConfig) -> Result<(), DraftHelperError> {
    init_tracing(&config.server.log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "starting drafthelper serve");

    // Credential problems surface before anything touches the disk.
    let provider = Arc::new(GroqProvider::new(&config)?);

    let store = Arc::new(SqliteDraftStore::new(config.storage.clone()));
    store.initialize().await?;

    let service = DraftService::new(
        provider.clone(),
        store.clone(),
        config.provider.model.clone(),
    );

    let cancel = shutdown::install_signal_handler();
    let served =
        drafthelper_gateway::start_server(&config.server, GatewayState::new(service), cancel)
            .await;

    if let Err(e) = provider.shutdown().await {
        error!(error = %e, "provider shutdown failed");
    }
    if let Err(e) = store.close().await {
        error!(error = %e, "storage close failed");
    }

    served?;
    info!("drafthelper stopped");
    Ok(())
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "drafthelper={log_level},tower_http={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
