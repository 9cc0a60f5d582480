// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as known log levels and usable port numbers.

use crate::diagnostic::ConfigError;
use crate::model::ClipferryConfig;

const KNOWN_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ClipferryConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.relay.log_level.trim();
    if !KNOWN_LOG_LEVELS.contains(&level) {
        errors.push(ConfigError::Validation {
            message: format!(
                "relay.log_level `{level}` is not one of trace, debug, info, warn, error"
            ),
        });
    }

    if config.relay.download_root.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "relay.download_root must not be empty".to_string(),
        });
    }

    // A present-but-blank token is almost always a templating mistake;
    // reject it here rather than failing at the Telegram API.
    if let Some(token) = &config.telegram.bot_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "telegram.bot_token is set but blank".to_string(),
        });
    }

    if config.fetcher.binary.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "fetcher.binary must not be empty".to_string(),
        });
    }

    if config.fetcher.retries == 0 {
        errors.push(ConfigError::Validation {
            message: "fetcher.retries must be at least 1".to_string(),
        });
    }

    if config.fetcher.output_template.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "fetcher.output_template must not be empty".to_string(),
        });
    }

    if config.gateway.enabled {
        let host = config.gateway.host.trim();
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = !host.is_empty()
            && host
                .chars()
                .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }

        if config.gateway.port == 0 {
            errors.push(ConfigError::Validation {
                message: "gateway.port must be non-zero".to_string(),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
