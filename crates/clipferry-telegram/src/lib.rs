// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel for the clipferry media relay.
//!
//! Connects to the Telegram Bot API via teloxide long polling, routes each
//! inbound message into the relay pipeline as its own task, and answers
//! bot commands. Requests interleave at await points; there is no shared
//! mutable state between them.

pub mod deliver;
pub mod handler;
pub mod notices;
pub mod relay;
pub mod urls;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clipferry_config::model::TelegramConfig;
use clipferry_core::{MediaFetcher, RelayError};
use teloxide::dptree;
use teloxide::prelude::*;
use tracing::info;

pub use relay::RelayContext;

/// Write window for outbound sends. Large media over slow connections
/// needs far more than the default client budget.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(60);

/// The Telegram channel: one bot, one dispatcher, one relay context.
pub struct TelegramChannel {
    bot: Bot,
    context: Arc<RelayContext>,
}

impl TelegramChannel {
    /// Creates the channel.
    ///
    /// Requires `config.bot_token` to be set; the token is never embedded
    /// in source, it arrives via the configuration surface.
    pub fn new(
        config: TelegramConfig,
        fetcher: Arc<dyn MediaFetcher>,
        download_root: PathBuf,
    ) -> Result<Self, RelayError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            RelayError::Config("telegram.bot_token is required to start the bot".into())
        })?;

        if token.trim().is_empty() {
            return Err(RelayError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        let client = teloxide::net::default_reqwest_settings()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .map_err(|e| RelayError::Channel {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let bot = Bot::with_client(token, client);
        let context = Arc::new(RelayContext {
            fetcher,
            download_root,
            allowed_users: config.allowed_users,
        });

        Ok(Self { bot, context })
    }

    /// Returns a reference to the underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// Runs long polling until shutdown (Ctrl-C).
    ///
    /// Each message is handled as its own task by the dispatcher, so a
    /// slow download never blocks other chats.
    pub async fn dispatch(self) {
        info!("starting Telegram long polling");

        let tree = Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<handler::Command>()
                    .endpoint(handler::handle_command),
            )
            .branch(dptree::endpoint(relay::handle_message));

        Dispatcher::builder(self.bot, tree)
            .dependencies(dptree::deps![self.context])
            .default_handler(|_| async {}) // Silently ignore non-message updates
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clipferry_core::FetchOutcome;
    use std::path::Path;

    struct StubFetcher;

    #[async_trait]
    impl MediaFetcher for StubFetcher {
        async fn fetch(&self, _url: &str, _dest: &Path) -> FetchOutcome {
            FetchOutcome::Fetched(Vec::new())
        }
    }

    fn stub() -> Arc<dyn MediaFetcher> {
        Arc::new(StubFetcher)
    }

    #[test]
    fn new_requires_bot_token() {
        let config = TelegramConfig {
            bot_token: None,
            allowed_users: vec![],
        };
        assert!(TelegramChannel::new(config, stub(), PathBuf::from(".")).is_err());
    }

    #[test]
    fn new_rejects_blank_token() {
        let config = TelegramConfig {
            bot_token: Some("   ".into()),
            allowed_users: vec![],
        };
        assert!(TelegramChannel::new(config, stub(), PathBuf::from(".")).is_err());
    }

    #[test]
    fn new_accepts_valid_token() {
        let config = TelegramConfig {
            bot_token: Some("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11".into()),
            allowed_users: vec!["42".into()],
        };
        let channel = TelegramChannel::new(config, stub(), PathBuf::from("/var/tmp"));
        let channel = channel.expect("valid token should construct");
        assert_eq!(channel.context.allowed_users, vec!["42".to_string()]);
        assert_eq!(channel.context.download_root, PathBuf::from("/var/tmp"));
    }
}
