// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The extraction-backend trait seam.

use std::path::Path;

use async_trait::async_trait;

use crate::types::FetchOutcome;

/// Resolves a media URL into files on disk.
///
/// Implementations write every produced file into `dest` (which exists
/// before the call) and report what they produced. They must not delete or
/// move files, and they must not error: every backend failure collapses
/// into [`FetchOutcome::Failed`] so the pipeline sees a single failure
/// signal regardless of cause.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Fetches `url` into the `dest` directory.
    async fn fetch(&self, url: &str, dest: &Path) -> FetchOutcome;
}
