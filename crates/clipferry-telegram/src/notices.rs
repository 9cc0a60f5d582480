// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-visible status texts.
//!
//! Exactly three failure notices exist — invalid link, download failure,
//! generic processing error — and none of them leak internal detail.
//! Causes always go to the logs instead.

/// Reply to a message that does not reference the platform at all.
pub const INVALID_LINK: &str = "❌ Invalid link. Please send me a TikTok link.";

/// Initial status reply while the request is being handled.
pub const PROCESSING: &str = "⏳ Processing link...";

/// Status text when the backend produced nothing.
pub const DOWNLOAD_FAILED: &str =
    "❌ Download failed. The link may be invalid, private, or the format is not supported.";

/// Status text between fetch completion and delivery.
pub const SENDING: &str = "✅ Download complete! Sending...";

/// Status text for any unexpected error during handling.
pub const GENERIC_ERROR: &str = "❌ Something went wrong. Please try again.";

/// Reply to the /start command.
pub const WELCOME: &str =
    "👋 Hi! Send me a TikTok link and I'll fetch the video or photos for you.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_notices_are_distinct() {
        // The three outward failure messages must stay distinguishable.
        assert_ne!(INVALID_LINK, DOWNLOAD_FAILED);
        assert_ne!(DOWNLOAD_FAILED, GENERIC_ERROR);
        assert_ne!(INVALID_LINK, GENERIC_ERROR);
    }

    #[test]
    fn notices_do_not_leak_internals() {
        for notice in [INVALID_LINK, PROCESSING, DOWNLOAD_FAILED, SENDING, GENERIC_ERROR] {
            assert!(!notice.contains("yt-dlp"));
            assert!(!notice.contains("error:"));
        }
    }
}
