// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the clipferry media relay.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, producing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level clipferry configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values;
/// only `telegram.bot_token` must be supplied for the bot to start.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClipferryConfig {
    /// Relay-wide settings (logging, scratch space).
    #[serde(default)]
    pub relay: RelayConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Extraction backend settings.
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Liveness HTTP endpoint settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Relay-wide configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory under which per-request workspaces are created.
    #[serde(default = "default_download_root")]
    pub download_root: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            download_root: default_download_root(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_download_root() -> String {
    ".".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required at startup; supply via config file
    /// or the `CLIPFERRY_TELEGRAM_BOT_TOKEN` environment variable.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Telegram user IDs or usernames allowed to use the bot.
    /// An empty list leaves the bot open to everyone.
    #[serde(default)]
    pub allowed_users: Vec<String>,
}

/// Extraction backend configuration.
///
/// Defaults mirror how the relay drives yt-dlp against the source platform:
/// bounded output filenames, generous retry and socket budgets for slow
/// transfers, and browser-like headers to reduce the chance of being
/// blocked.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FetcherConfig {
    /// Backend executable to invoke.
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Output filename template, relative to the request workspace.
    /// Bounds the title length and disambiguates multi-item results.
    #[serde(default = "default_output_template")]
    pub output_template: String,

    /// Retry count the backend applies to transient network failures.
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Socket timeout in seconds passed to the backend.
    #[serde(default = "default_socket_timeout")]
    pub socket_timeout_secs: u64,

    /// User-Agent header sent by the backend.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Referer header sent by the backend.
    #[serde(default = "default_referer")]
    pub referer: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            output_template: default_output_template(),
            retries: default_retries(),
            socket_timeout_secs: default_socket_timeout(),
            user_agent: default_user_agent(),
            referer: default_referer(),
        }
    }
}

fn default_binary() -> String {
    "yt-dlp".to_string()
}

fn default_output_template() -> String {
    "%(title).50s_%(autonumber)s.%(ext)s".to_string()
}

fn default_retries() -> u32 {
    10
}

fn default_socket_timeout() -> u64 {
    1000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36"
        .to_string()
}

fn default_referer() -> String {
    "https://www.tiktok.com/".to_string()
}

/// Liveness HTTP endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Whether to run the liveness endpoint at all.
    #[serde(default = "default_gateway_enabled")]
    pub enabled: bool,

    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: default_gateway_enabled(),
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

fn default_gateway_enabled() -> bool {
    true
}

fn default_gateway_host() -> String {
    "0.0.0.0".to_string()
}

fn default_gateway_port() -> u16 {
    8080
}
