// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message filtering and bot commands.
//!
//! Decides whether an incoming Telegram message should enter the relay
//! pipeline, and answers the `/start` command.

use teloxide::prelude::*;
use teloxide::types::ReplyParameters;
use teloxide::utils::command::BotCommands;
use tracing::debug;

use crate::notices;

/// The platform marker an inbound message must carry to be treated as a
/// relay request. This is a pure input-shape check, not a fetch attempt.
const PLATFORM_MARKER: &str = "tiktok.com";

/// Bot commands understood by clipferry.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Show the welcome message.
    Start,
}

/// Whether the message text references the platform at all.
pub fn mentions_platform(text: &str) -> bool {
    text.contains(PLATFORM_MARKER)
}

/// Checks whether the message sender may use the bot.
///
/// An empty `allowed_users` list leaves the bot open to everyone. A
/// non-empty list restricts use to the listed user IDs or usernames
/// (with or without a leading `@`, case-insensitive).
///
/// Messages without a sender (channel posts) are rejected when a
/// restriction list is in force.
pub fn is_allowed(msg: &Message, allowed_users: &[String]) -> bool {
    if allowed_users.is_empty() {
        return true;
    }

    let Some(user) = msg.from.as_ref() else {
        return false;
    };

    let user_id_str = user.id.0.to_string();

    for allowed in allowed_users {
        if *allowed == user_id_str {
            return true;
        }
        if let Some(ref username) = user.username {
            let allowed_clean = allowed.strip_prefix('@').unwrap_or(allowed);
            if username.eq_ignore_ascii_case(allowed_clean) {
                return true;
            }
        }
    }

    debug!(user_id = user.id.0, "sender is not on the allow list");
    false
}

/// Endpoint for bot commands.
pub async fn handle_command(bot: Bot, msg: Message, cmd: Command) -> ResponseResult<()> {
    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, notices::WELCOME)
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a mock private chat message from JSON, matching the Telegram
    /// Bot API structure.
    fn make_message(user_id: u64, username: Option<&str>, text: &str) -> Message {
        let from = match username {
            Some(uname) => serde_json::json!({
                "id": user_id,
                "is_bot": false,
                "first_name": "Test",
                "username": uname,
            }),
            None => serde_json::json!({
                "id": user_id,
                "is_bot": false,
                "first_name": "Test",
            }),
        };

        let json = serde_json::json!({
            "message_id": 1,
            "date": 1700000000i64,
            "chat": {
                "id": user_id as i64,
                "type": "private",
                "first_name": "Test",
            },
            "from": from,
            "text": text,
        });

        serde_json::from_value(json).expect("failed to deserialize mock message")
    }

    /// Build a mock message without a sender.
    fn make_no_sender_message(text: &str) -> Message {
        let json = serde_json::json!({
            "message_id": 1,
            "date": 1700000000i64,
            "chat": {
                "id": 12345i64,
                "type": "private",
                "first_name": "Test",
            },
            "text": text,
        });

        serde_json::from_value(json).expect("failed to deserialize mock message")
    }

    #[test]
    fn platform_marker_detected_anywhere_in_text() {
        assert!(mentions_platform("https://www.tiktok.com/@a/video/1"));
        assert!(mentions_platform("look: https://vm.tiktok.com/ZM123/"));
        assert!(!mentions_platform("https://example.com/watch?v=1"));
        assert!(!mentions_platform("hello"));
    }

    #[test]
    fn empty_allow_list_is_open_to_everyone() {
        let msg = make_message(12345, None, "hi");
        assert!(is_allowed(&msg, &[]));
    }

    #[test]
    fn allowed_by_user_id() {
        let msg = make_message(12345, None, "hi");
        assert!(is_allowed(&msg, &["12345".into()]));
    }

    #[test]
    fn allowed_by_username_with_at() {
        let msg = make_message(12345, Some("testuser"), "hi");
        assert!(is_allowed(&msg, &["@testuser".into()]));
    }

    #[test]
    fn allowed_by_username_case_insensitive() {
        let msg = make_message(12345, Some("TestUser"), "hi");
        assert!(is_allowed(&msg, &["testuser".into()]));
    }

    #[test]
    fn rejected_when_not_listed() {
        let msg = make_message(12345, Some("testuser"), "hi");
        assert!(!is_allowed(&msg, &["99999".into()]));
    }

    #[test]
    fn no_sender_rejected_under_restriction() {
        let msg = make_no_sender_message("hi");
        assert!(!is_allowed(&msg, &["12345".into()]));
    }

    #[test]
    fn start_command_parses() {
        assert!(matches!(
            Command::parse("/start", "clipferry_bot"),
            Ok(Command::Start)
        ));
        assert!(Command::parse("/stop", "clipferry_bot").is_err());
    }
}
