// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./drafthelper.toml` > `~/.config/drafthelper/drafthelper.toml`
//! > `/etc/drafthelper/drafthelper.toml`, with `DRAFTHELPER_` environment
//! variable overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::DraftHelperConfig;

/// Top-level config sections, used to map env var names onto dotted keys.
const SECTIONS: &[&str] = &["server", "storage", "provider"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/drafthelper/drafthelper.toml`
/// 3. `~/.config/drafthelper/drafthelper.toml`
/// 4. `./drafthelper.toml`
/// 5. `DRAFTHELPER_*` environment variables
pub fn load_config() -> Result<DraftHelperConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<DraftHelperConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DraftHelperConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DraftHelperConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DraftHelperConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(DraftHelperConfig::default()))
        .merge(Toml::file("/etc/drafthelper/drafthelper.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("drafthelper/drafthelper.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("drafthelper.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `DRAFTHELPER_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys contain
/// underscores: `DRAFTHELPER_PROVIDER_API_KEY` must become `provider.api_key`.
fn env_provider() -> Env {
    Env::prefixed("DRAFTHELPER_").map(|key| map_env_key(key.as_str()).into())
}

/// Figment hands over the key with the prefix stripped but the case kept.
fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("provider_api_key"), "provider.api_key");
        assert_eq!(map_env_key("server_request_timeout_secs"), "server.request_timeout_secs");
        assert_eq!(map_env_key("storage_database_path"), "storage.database_path");
    }

    #[test]
    fn env_keys_are_lowercased_before_mapping() {
        assert_eq!(map_env_key("PROVIDER_API_KEY"), "provider.api_key");
        assert_eq!(map_env_key("SERVER_PORT"), "server.port");
        assert_eq!(map_env_key("Storage_WAL_MODE"), "storage.wal_mode");
    }

    #[test]
    fn unknown_section_is_left_alone() {
        assert_eq!(map_env_key("something_else"), "something_else");
    }
}
