// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the clipferry media relay.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across all clipferry crates.
///
/// Extraction-backend failures are deliberately NOT represented here:
/// the fetcher collapses them into [`crate::types::FetchOutcome::Failed`]
/// so that a bad link or a blocked download is an outcome, not an error.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Channel errors (Telegram API failure, send/edit/delete failure, bind failure).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Per-request workspace directory could not be created.
    ///
    /// Fatal for the request that owns the workspace, never for the process.
    #[error("workspace error at {path}: {source}")]
    Workspace {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
