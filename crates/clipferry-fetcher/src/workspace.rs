// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-request workspace directories.
//!
//! Each inbound request gets its own scratch directory named
//! `temp_<chat>_<message>`, so concurrent requests can never collide as
//! long as message ids are unique per chat (which the transport
//! guarantees). The directory exists from acquisition until the owning
//! request finishes, success or failure.

use std::path::{Path, PathBuf};

use clipferry_core::{FetchedFile, RelayError};
use tracing::{debug, warn};

/// A scoped scratch directory owned by exactly one request.
///
/// Acquisition is explicit; release must be called on every exit path of
/// the owning request. Release never fails the request: removal errors are
/// logged and swallowed so teardown cannot mask the outcome already
/// reported to the user.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
}

impl Workspace {
    /// Creates the workspace directory for `(chat_id, message_id)` under `root`.
    ///
    /// Creation is idempotent: an already-existing directory (a retried
    /// message, for example) is reused as-is. A creation failure is fatal
    /// for the request that asked for the workspace.
    pub async fn acquire(root: &Path, chat_id: i64, message_id: i32) -> Result<Self, RelayError> {
        let path = root.join(format!("temp_{chat_id}_{message_id}"));
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|source| RelayError::Workspace {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "workspace acquired");
        Ok(Self { path })
    }

    /// The workspace directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the workspace directory and everything in it.
    ///
    /// Never propagates an error: if removal fails the request has already
    /// succeeded or failed on its own terms, so the failure is logged and
    /// the directory is left for an operator to reap.
    pub async fn release(self) {
        match tokio::fs::remove_dir_all(&self.path).await {
            Ok(()) => debug!(path = %self.path.display(), "workspace released"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to remove workspace");
            }
        }
    }
}

/// Lists every regular file currently in `dir` with its size.
///
/// Order is whatever the filesystem yields; callers needing determinism
/// sort downstream.
pub async fn list_files(dir: &Path) -> std::io::Result<Vec<FetchedFile>> {
    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let meta = entry.metadata().await?;
        if meta.is_file() {
            files.push(FetchedFile::new(entry.path(), meta.len()));
        }
    }
    Ok(files)
}
