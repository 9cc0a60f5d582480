// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps a delivery plan onto the transport's send primitives.
//!
//! Files are streamed from the workspace in place — nothing is copied or
//! moved before sending. Transport errors propagate to the pipeline's
//! error handler; the workspace teardown there runs regardless.

use clipferry_core::{DeliveryPlan, RelayError};
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, InputMedia, InputMediaPhoto};
use tracing::info;

/// Sends a classified result to `chat`.
///
/// A video goes out with the inline-playback primitive, an oversized or
/// non-video single file as a generic document, and a multi-file result as
/// one grouped photo message in the plan's (sorted) order.
pub async fn send_plan(bot: &Bot, chat: ChatId, plan: DeliveryPlan) -> Result<(), RelayError> {
    info!(chat_id = chat.0, shape = %plan.kind(), "delivering result");

    match plan {
        DeliveryPlan::Video(path) => {
            bot.send_video(chat, InputFile::file(path))
                .await
                .map_err(|e| send_error("failed to send video", e))?;
        }
        DeliveryPlan::Document(path) => {
            bot.send_document(chat, InputFile::file(path))
                .await
                .map_err(|e| send_error("failed to send document", e))?;
        }
        DeliveryPlan::PhotoGroup(paths) => {
            let media: Vec<InputMedia> = paths
                .into_iter()
                .map(|path| InputMedia::Photo(InputMediaPhoto::new(InputFile::file(path))))
                .collect();
            bot.send_media_group(chat, media)
                .await
                .map_err(|e| send_error("failed to send media group", e))?;
        }
    }

    Ok(())
}

fn send_error(context: &str, e: teloxide::RequestError) -> RelayError {
    RelayError::Channel {
        message: format!("{context}: {e}"),
        source: Some(Box::new(e)),
    }
}
