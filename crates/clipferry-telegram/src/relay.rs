// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-request relay pipeline.
//!
//! Each inbound message runs reject -> status reply -> workspace acquire ->
//! fetch -> classify -> deliver -> status cleanup, strictly in order. All
//! failures are contained to the request: the endpoint never lets one
//! message's problem disturb another in-flight request or the dispatcher,
//! and the workspace is released on every exit path.

use std::path::PathBuf;
use std::sync::Arc;

use clipferry_core::{DeliveryPlan, FetchOutcome, MediaFetcher, RelayError};
use clipferry_fetcher::Workspace;
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, ReplyParameters};
use tracing::{debug, error, warn};

use crate::{deliver, handler, notices, urls};

/// Everything a request handler needs beyond the bot itself.
///
/// Cloned into the dispatcher's dependency map once at startup; requests
/// share it immutably.
#[derive(Clone)]
pub struct RelayContext {
    /// The extraction backend.
    pub fetcher: Arc<dyn MediaFetcher>,
    /// Directory under which per-request workspaces are created.
    pub download_root: PathBuf,
    /// Allow list for the bot; empty means public.
    pub allowed_users: Vec<String>,
}

/// Endpoint for plain text messages.
pub async fn handle_message(bot: Bot, msg: Message, ctx: Arc<RelayContext>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        debug!(msg_id = msg.id.0, "ignoring non-text message");
        return Ok(());
    };

    if !handler::is_allowed(&msg, &ctx.allowed_users) {
        return Ok(());
    }

    if !handler::mentions_platform(text) {
        bot.send_message(msg.chat.id, notices::INVALID_LINK)
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;
        return Ok(());
    }

    relay_link(&bot, &msg, text.trim(), &ctx).await;
    Ok(())
}

/// Runs one relay request to completion.
///
/// Owns the request lifecycle end to end: whatever happens inside the
/// stages, the status message reflects the outcome and the workspace is
/// gone by the time this returns.
async fn relay_link(bot: &Bot, msg: &Message, text: &str, ctx: &RelayContext) {
    let chat = msg.chat.id;
    let url = urls::canonicalize(text);

    let status = match bot
        .send_message(chat, notices::PROCESSING)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await
    {
        Ok(status) => status,
        Err(e) => {
            // Without a status handle there is nothing to report into;
            // nothing has been allocated yet, so just drop the request.
            error!(chat_id = chat.0, error = %e, "could not post status message");
            return;
        }
    };

    let workspace = match Workspace::acquire(&ctx.download_root, chat.0, msg.id.0).await {
        Ok(workspace) => workspace,
        Err(e) => {
            error!(chat_id = chat.0, error = %e, "could not acquire workspace");
            edit_quietly(bot, chat, status.id, notices::GENERIC_ERROR).await;
            return;
        }
    };

    if let Err(e) = run_stages(bot, chat, status.id, workspace.path(), &url, ctx).await {
        error!(chat_id = chat.0, msg_id = msg.id.0, error = %e, "relay request failed");
        edit_quietly(bot, chat, status.id, notices::GENERIC_ERROR).await;
    }

    // Terminal action on every path: the workspace never survives the
    // request, even when the status edits above failed.
    workspace.release().await;
}

/// The fallible stages between workspace acquisition and teardown.
///
/// A fetch that produces nothing is handled here (download-failure notice,
/// `Ok` return); a transport error anywhere propagates to the caller's
/// generic error handler.
async fn run_stages(
    bot: &Bot,
    chat: ChatId,
    status_id: MessageId,
    workspace: &std::path::Path,
    url: &str,
    ctx: &RelayContext,
) -> Result<(), RelayError> {
    let files = match ctx.fetcher.fetch(url, workspace).await {
        FetchOutcome::Failed(diagnostic) => {
            // Diagnostic is for the logs; users get one fixed notice.
            warn!(chat_id = chat.0, %diagnostic, "extraction backend failed");
            Vec::new()
        }
        FetchOutcome::Fetched(files) => files,
    };

    let Some(plan) = DeliveryPlan::classify(&files) else {
        edit_status(bot, chat, status_id, notices::DOWNLOAD_FAILED).await?;
        return Ok(());
    };

    edit_status(bot, chat, status_id, notices::SENDING).await?;
    deliver::send_plan(bot, chat, plan).await?;

    // Delivery succeeded; the status message has served its purpose.
    if let Err(e) = bot.delete_message(chat, status_id).await {
        warn!(chat_id = chat.0, error = %e, "could not delete status message");
    }

    Ok(())
}

/// Edits the status message, propagating failure.
async fn edit_status(
    bot: &Bot,
    chat: ChatId,
    status_id: MessageId,
    text: &str,
) -> Result<(), RelayError> {
    bot.edit_message_text(chat, status_id, text)
        .await
        .map_err(|e| RelayError::Channel {
            message: format!("failed to edit status message: {e}"),
            source: Some(Box::new(e)),
        })?;
    Ok(())
}

/// Edits the status message on a path that must keep going regardless
/// (the message may already be deleted, the chat gone, and so on).
async fn edit_quietly(bot: &Bot, chat: ChatId, status_id: MessageId, text: &str) {
    if let Err(e) = bot.edit_message_text(chat, status_id, text).await {
        warn!(chat_id = chat.0, error = %e, "could not edit status message");
    }
}
