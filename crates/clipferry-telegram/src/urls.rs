// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical-URL extraction for inbound links.
//!
//! Share links are usually decorated with tracking query parameters; the
//! canonical form is just scheme, host, handle, kind, and numeric id.
//! Normalization is best-effort and never fails: anything that does not
//! match the canonical shape (short `vm.tiktok.com` redirect links, for
//! example) passes through verbatim and the backend follows redirects.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

static CANONICAL_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://www\.tiktok\.com/@[^/]+/(?:video|photo)/\d+")
        .expect("canonical URL pattern is valid")
});

/// Extracts the canonical URL from `raw`, or returns `raw` unchanged.
///
/// On a match, exactly the matched substring is returned — query
/// parameters and any trailing path segments are dropped.
pub fn canonicalize(raw: &str) -> String {
    match CANONICAL_URL.find(raw) {
        Some(m) => {
            let url = m.as_str().to_string();
            info!(%url, "canonicalized link");
            url
        }
        None => {
            debug!("link does not match canonical shape, passing through");
            raw.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_query_parameters() {
        assert_eq!(
            canonicalize("https://www.tiktok.com/@alice/video/12345?lang=en"),
            "https://www.tiktok.com/@alice/video/12345"
        );
    }

    #[test]
    fn drops_trailing_path_segments() {
        assert_eq!(
            canonicalize("https://www.tiktok.com/@alice/video/12345/extra/bits"),
            "https://www.tiktok.com/@alice/video/12345"
        );
    }

    #[test]
    fn extracts_from_surrounding_text() {
        assert_eq!(
            canonicalize("check this https://www.tiktok.com/@bob/photo/999 out"),
            "https://www.tiktok.com/@bob/photo/999"
        );
    }

    #[test]
    fn plain_http_matches_too() {
        assert_eq!(
            canonicalize("http://www.tiktok.com/@bob/video/1"),
            "http://www.tiktok.com/@bob/video/1"
        );
    }

    #[test]
    fn short_share_links_pass_through() {
        let raw = "https://vm.tiktok.com/ZMabcdef/";
        assert_eq!(canonicalize(raw), raw);
    }

    #[test]
    fn non_links_pass_through() {
        assert_eq!(canonicalize("hello there"), "hello there");
    }

    #[test]
    fn handle_must_precede_kind() {
        // A URL missing the @handle segment is not canonical.
        let raw = "https://www.tiktok.com/video/12345";
        assert_eq!(canonicalize(raw), raw);
    }
}
