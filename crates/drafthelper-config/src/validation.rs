// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Semantic constraints serde attributes cannot express: address shape,
//! non-empty paths and identifiers, positive timeouts, known log levels.

use crate::diagnostic::ConfigError;
use crate::model::DraftHelperConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every violation instead of failing on the first one.
pub fn validate_config(config: &DraftHelperConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.server.port == 0 {
        fail("server.port must be non-zero".to_string());
    }

    if !LOG_LEVELS.contains(&config.server.log_level.as_str()) {
        fail(format!(
            "server.log_level `{}` must be one of: {}",
            config.server.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.server.request_timeout_secs == 0 {
        fail("server.request_timeout_secs must be greater than zero".to_string());
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    let base_url = config.provider.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        fail(format!(
            "provider.base_url `{base_url}` must start with http:// or https://"
        ));
    }

    if config.provider.model.trim().is_empty() {
        fail("provider.model must not be empty".to_string());
    }

    if config.provider.timeout_secs == 0 {
        fail("provider.timeout_secs must be greater than zero".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&DraftHelperConfig::default()).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = DraftHelperConfig::default();
        config.storage.database_path = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("storage.database_path"));
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = DraftHelperConfig::default();
        config.provider.base_url = "ftp://api.groq.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("provider.base_url"));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = DraftHelperConfig::default();
        config.server.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("verbose"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = DraftHelperConfig::default();
        config.server.port = 0;
        config.server.host = "not a host!".to_string();
        config.provider.model = String::new();
        config.provider.timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
