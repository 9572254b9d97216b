// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for drafthelper.
//!
//! TOML configuration with strict validation (`deny_unknown_fields`), an XDG
//! file hierarchy, `DRAFTHELPER_*` environment overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use drafthelper_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::DraftHelperConfig;

/// Environment variable consulted when `provider.api_key` is not configured.
pub const FALLBACK_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<DraftHelperConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let toml_sources = collect_toml_sources();
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Load configuration from one explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<DraftHelperConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<DraftHelperConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Resolve the provider credential.
///
/// Order: `provider.api_key` (file or `DRAFTHELPER_PROVIDER_API_KEY`), then
/// `GROQ_API_KEY`. Blank values count as missing.
pub fn resolve_api_key(config: &DraftHelperConfig) -> Result<String, ConfigError> {
    resolve_api_key_with(config, |name| std::env::var(name).ok())
}

fn resolve_api_key_with(
    config: &DraftHelperConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    config
        .provider
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .or_else(|| lookup(FALLBACK_API_KEY_ENV).filter(|key| !key.trim().is_empty()))
        .ok_or_else(|| ConfigError::MissingKey {
            key: "provider.api_key".to_string(),
        })
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Ok(content) = std::fs::read_to_string("drafthelper.toml") {
        let path = std::env::current_dir()
            .map(|d| d.join("drafthelper.toml").display().to_string())
            .unwrap_or_else(|_| "drafthelper.toml".to_string());
        sources.push((path, content));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("drafthelper/drafthelper.toml");
        if let Ok(content) = std::fs::read_to_string(&path) {
            sources.push((path.display().to_string(), content));
        }
    }

    let system_path = Path::new("/etc/drafthelper/drafthelper.toml");
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push((system_path.display().to_string(), content));
    }

    sources
}
