// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! yt-dlp subprocess driver implementing [`MediaFetcher`].
//!
//! The backend is invoked in download mode against a normalized URL and an
//! existing workspace directory. Every failure mode the binary can exhibit
//! (missing executable, network failure, private or removed content,
//! upstream extractor changes) collapses into [`FetchOutcome::Failed`]; the
//! pipeline never sees a backend error as an `Err`.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use clipferry_config::model::FetcherConfig;
use clipferry_core::{FetchOutcome, MediaFetcher};
use tokio::process::Command;
use tracing::{debug, error, info};

/// Drives the external yt-dlp binary with fixed, relay-wide options.
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    config: FetcherConfig,
}

impl YtDlpFetcher {
    pub fn new(config: FetcherConfig) -> Self {
        Self { config }
    }

    /// Argument vector for one download invocation.
    ///
    /// Playlist mode stays enabled because a single link may resolve to a
    /// whole photo carousel; the output template both bounds the title
    /// length and sequence-numbers the items.
    fn args(&self, url: &str, dest: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--quiet".into(),
            "--no-warnings".into(),
            "--yes-playlist".into(),
            "--retries".into(),
            self.config.retries.to_string().into(),
            "--socket-timeout".into(),
            self.config.socket_timeout_secs.to_string().into(),
            "--user-agent".into(),
            self.config.user_agent.clone().into(),
            "--referer".into(),
            self.config.referer.clone().into(),
            "--output".into(),
        ];
        args.push(dest.join(&self.config.output_template).into_os_string());
        args.push(url.into());
        args
    }
}

#[async_trait]
impl MediaFetcher for YtDlpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> FetchOutcome {
        info!(url, dest = %dest.display(), "invoking extraction backend");

        let output = Command::new(&self.config.binary)
            .args(self.args(url, dest))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                error!(binary = %self.config.binary, error = %e, "failed to spawn backend");
                return FetchOutcome::Failed(format!(
                    "failed to spawn `{}`: {e}",
                    self.config.binary
                ));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let diagnostic = stderr
                .lines()
                .last()
                .unwrap_or("backend exited with an error")
                .to_string();
            error!(status = %output.status, %diagnostic, "backend failed");
            return FetchOutcome::Failed(diagnostic);
        }

        match crate::workspace::list_files(dest).await {
            Ok(files) => {
                debug!(count = files.len(), "backend produced files");
                FetchOutcome::Fetched(files)
            }
            Err(e) => {
                error!(dest = %dest.display(), error = %e, "failed to list workspace");
                FetchOutcome::Failed(format!("failed to list workspace: {e}"))
            }
        }
    }
}
