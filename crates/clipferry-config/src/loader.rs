// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./clipferry.toml` > `~/.config/clipferry/clipferry.toml`
//! > `/etc/clipferry/clipferry.toml` with environment variable overrides via
//! the `CLIPFERRY_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ClipferryConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/clipferry/clipferry.toml` (system-wide)
/// 3. `~/.config/clipferry/clipferry.toml` (user XDG config)
/// 4. `./clipferry.toml` (local directory)
/// 5. `CLIPFERRY_*` environment variables
pub fn load_config() -> Result<ClipferryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ClipferryConfig::default()))
        .merge(Toml::file("/etc/clipferry/clipferry.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("clipferry/clipferry.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("clipferry.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<ClipferryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ClipferryConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ClipferryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ClipferryConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores themselves: `CLIPFERRY_TELEGRAM_BOT_TOKEN` must map to
/// `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("CLIPFERRY_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped,
        // e.g. CLIPFERRY_TELEGRAM_BOT_TOKEN -> "telegram_bot_token".
        let mapped = key
            .as_str()
            .replacen("relay_", "relay.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("fetcher_", "fetcher.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_string_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[relay]
log_level = "debug"

[gateway]
port = 9090
"#,
        )
        .expect("valid TOML should load");
        assert_eq!(config.relay.log_level, "debug");
        assert_eq!(config.gateway.port, 9090);
        // Untouched sections keep their defaults.
        assert_eq!(config.fetcher.binary, "yt-dlp");
    }

    #[test]
    fn empty_string_yields_defaults() {
        let config = load_config_from_str("").expect("empty TOML should load");
        assert_eq!(config.relay.log_level, "info");
        assert!(config.telegram.bot_token.is_none());
    }
}
