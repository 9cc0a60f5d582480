// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `clipferry serve` command implementation.
//!
//! Wires the extraction backend into the Telegram channel, spawns the
//! liveness endpoint alongside it, and runs until shutdown.

use std::path::PathBuf;
use std::sync::Arc;

use clipferry_config::ClipferryConfig;
use clipferry_core::RelayError;
use clipferry_fetcher::YtDlpFetcher;
use clipferry_telegram::TelegramChannel;
use tracing::info;

/// Runs the `clipferry serve` command.
///
/// Returns only on unrecoverable startup failure (missing token, liveness
/// bind failure) or after a clean dispatcher shutdown. Per-request
/// failures never reach this level.
pub async fn run_serve(config: ClipferryConfig) -> Result<(), RelayError> {
    init_tracing(&config.relay.log_level);

    info!("starting clipferry serve");

    let fetcher = Arc::new(YtDlpFetcher::new(config.fetcher.clone()));
    let channel = TelegramChannel::new(
        config.telegram.clone(),
        fetcher,
        PathBuf::from(&config.relay.download_root),
    )?;

    if config.gateway.enabled {
        // The liveness endpoint shares nothing with the relay pipeline;
        // it only exists for external uptime checks. A bind failure
        // surfaces here as a startup error.
        tokio::select! {
            () = channel.dispatch() => {
                info!("dispatcher stopped, shutting down");
                Ok(())
            }
            result = clipferry_gateway::serve(&config.gateway) => result,
        }
    } else {
        channel.dispatch().await;
        info!("dispatcher stopped, shutting down");
        Ok(())
    }
}

/// Initializes the tracing subscriber from config, honoring `RUST_LOG`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,clipferry={l},clipferry_core={l},clipferry_config={l},\
             clipferry_fetcher={l},clipferry_telegram={l},clipferry_gateway={l}",
            l = log_level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
