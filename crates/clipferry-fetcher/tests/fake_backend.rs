// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end fetch tests against a scripted stand-in backend.
//!
//! A small shell script plays the role of yt-dlp: it locates the
//! `--output` argument, derives the workspace directory from it, and
//! writes (or refuses to write) media files there. This exercises the
//! whole fetch path — argument construction, subprocess handling, file
//! listing, outcome collapse — without touching the network.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use clipferry_config::model::FetcherConfig;
use clipferry_core::{DeliveryPlan, FetchOutcome, MediaFetcher};
use clipferry_fetcher::{Workspace, YtDlpFetcher};

/// Writes an executable shell script and returns its path.
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write script");
    let mut perms = std::fs::metadata(&path).expect("stat script").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod script");
    path
}

/// A backend that drops two photos into the workspace, like a carousel link.
const CAROUSEL_BACKEND: &str = r#"#!/bin/sh
out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "--output" ]; then out="$a"; fi
  prev="$a"
done
dir=$(dirname "$out")
printf 'jpegdata' > "$dir/slide_2.jpg"
printf 'jpegdata' > "$dir/slide_1.jpg"
"#;

/// A backend that fails the way yt-dlp does on a private link.
const REFUSING_BACKEND: &str = r#"#!/bin/sh
echo "ERROR: [TikTok] 123: This post may not be comfortable" >&2
exit 1
"#;

fn fetcher_for(binary: PathBuf) -> YtDlpFetcher {
    let config = FetcherConfig {
        binary: binary.display().to_string(),
        ..FetcherConfig::default()
    };
    YtDlpFetcher::new(config)
}

#[tokio::test]
async fn carousel_link_yields_sorted_photo_group() {
    let scratch = tempfile::tempdir().unwrap();
    let script = write_script(scratch.path(), "fake-yt-dlp", CAROUSEL_BACKEND);

    let ws = Workspace::acquire(scratch.path(), 100, 1).await.unwrap();
    let outcome = fetcher_for(script)
        .fetch("https://www.tiktok.com/@a/photo/1", ws.path())
        .await;

    let files = match &outcome {
        FetchOutcome::Fetched(files) => files.clone(),
        FetchOutcome::Failed(diag) => panic!("expected fetched files, got failure: {diag}"),
    };
    assert_eq!(files.len(), 2);

    let plan = DeliveryPlan::classify(&files).expect("two files must classify");
    match plan {
        DeliveryPlan::PhotoGroup(paths) => {
            assert!(paths[0].ends_with("slide_1.jpg"));
            assert!(paths[1].ends_with("slide_2.jpg"));
        }
        other => panic!("expected photo group, got {other:?}"),
    }

    let ws_path = ws.path().to_path_buf();
    ws.release().await;
    assert!(!ws_path.exists(), "workspace must not outlive the request");
}

#[tokio::test]
async fn refused_link_collapses_to_failed_and_workspace_still_goes_away() {
    let scratch = tempfile::tempdir().unwrap();
    let script = write_script(scratch.path(), "fake-yt-dlp", REFUSING_BACKEND);

    let ws = Workspace::acquire(scratch.path(), 100, 2).await.unwrap();
    let outcome = fetcher_for(script)
        .fetch("https://www.tiktok.com/@a/video/2", ws.path())
        .await;

    match outcome {
        FetchOutcome::Failed(diag) => {
            // The stderr tail is preserved for logs.
            assert!(diag.contains("ERROR"), "diagnostic should carry stderr: {diag}");
        }
        FetchOutcome::Fetched(files) => panic!("expected failure, got {} files", files.len()),
    }

    let ws_path = ws.path().to_path_buf();
    ws.release().await;
    assert!(!ws_path.exists(), "workspace must not outlive a failed request");
}

#[tokio::test]
async fn backend_writing_nothing_is_an_empty_fetch() {
    let scratch = tempfile::tempdir().unwrap();
    let script = write_script(scratch.path(), "fake-yt-dlp", "#!/bin/sh\nexit 0\n");

    let ws = Workspace::acquire(scratch.path(), 100, 3).await.unwrap();
    let outcome = fetcher_for(script)
        .fetch("https://www.tiktok.com/@a/video/3", ws.path())
        .await;

    // An empty set is the pipeline's failure signal even when the backend
    // exits cleanly.
    match outcome {
        FetchOutcome::Fetched(files) => assert!(files.is_empty()),
        FetchOutcome::Failed(diag) => panic!("clean exit should not be Failed: {diag}"),
    }

    ws.release().await;
}
