// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Media fetch and delivery types shared across the relay.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::Display;

/// Largest single file the transport will accept as an inline-playable video.
/// Anything at or above this size is delivered as a generic document.
pub const VIDEO_SIZE_LIMIT: u64 = 50 * 1024 * 1024;

/// A single file produced by the extraction backend inside a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedFile {
    /// Absolute path of the file inside the request workspace.
    pub path: PathBuf,
    /// File size in bytes.
    pub len: u64,
}

impl FetchedFile {
    pub fn new(path: impl Into<PathBuf>, len: u64) -> Self {
        Self {
            path: path.into(),
            len,
        }
    }
}

/// Outcome of one extraction-backend invocation.
///
/// Backend failures never propagate as errors: the fetcher collapses every
/// failure mode (network, private content, unsupported format, upstream
/// extractor changes) into [`FetchOutcome::Failed`]. The diagnostic string
/// exists for logs only and must never be shown to end users.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The backend ran to completion; `files` is everything now present in
    /// the workspace. May be empty, which callers treat as a failure.
    Fetched(Vec<FetchedFile>),
    /// The backend failed. The diagnostic is opaque to business logic.
    Failed(String),
}

impl FetchOutcome {
    /// Files produced by a successful fetch, if any.
    pub fn files(&self) -> &[FetchedFile] {
        match self {
            FetchOutcome::Fetched(files) => files,
            FetchOutcome::Failed(_) => &[],
        }
    }
}

/// The delivery shape label, used for logging and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum DeliveryKind {
    Video,
    Document,
    PhotoGroup,
}

/// How a fetched file set should be handed to the chat transport.
///
/// Derived, never stored. Zero files yields no plan at all, which the
/// pipeline reports as a download failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryPlan {
    /// Exactly one file with a video extension under [`VIDEO_SIZE_LIMIT`],
    /// sent with the transport's inline-playback primitive.
    Video(PathBuf),
    /// Exactly one file that is oversized or not a video (audio-only or
    /// single-image results land here).
    Document(PathBuf),
    /// Two or more files, treated as an ordered photo set. Paths are sorted
    /// lexicographically so group order is deterministic regardless of how
    /// the backend enumerated them.
    PhotoGroup(Vec<PathBuf>),
}

impl DeliveryPlan {
    /// Classifies a fetched file set into a delivery plan.
    ///
    /// Returns `None` for an empty set. Multi-file results are always a
    /// photo group, matching the upstream platform's carousel behavior;
    /// the backend's playlist mode could in principle produce non-image
    /// sets, which this classifier does not distinguish.
    pub fn classify(files: &[FetchedFile]) -> Option<DeliveryPlan> {
        match files {
            [] => None,
            [single] => {
                if is_video_path(&single.path) && single.len < VIDEO_SIZE_LIMIT {
                    Some(DeliveryPlan::Video(single.path.clone()))
                } else {
                    Some(DeliveryPlan::Document(single.path.clone()))
                }
            }
            many => {
                let mut paths: Vec<PathBuf> = many.iter().map(|f| f.path.clone()).collect();
                paths.sort();
                Some(DeliveryPlan::PhotoGroup(paths))
            }
        }
    }

    /// The shape label for this plan.
    pub fn kind(&self) -> DeliveryKind {
        match self {
            DeliveryPlan::Video(_) => DeliveryKind::Video,
            DeliveryPlan::Document(_) => DeliveryKind::Document,
            DeliveryPlan::PhotoGroup(_) => DeliveryKind::PhotoGroup,
        }
    }
}

/// Whether the file extension indicates an inline-playable video container.
fn is_video_path(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_has_no_plan() {
        assert_eq!(DeliveryPlan::classify(&[]), None);
    }

    #[test]
    fn small_mp4_is_video() {
        let files = [FetchedFile::new("clip.mp4", VIDEO_SIZE_LIMIT - 1)];
        assert_eq!(
            DeliveryPlan::classify(&files),
            Some(DeliveryPlan::Video(PathBuf::from("clip.mp4")))
        );
    }

    #[test]
    fn oversized_mp4_is_document() {
        let files = [FetchedFile::new("clip.mp4", VIDEO_SIZE_LIMIT)];
        assert_eq!(
            DeliveryPlan::classify(&files),
            Some(DeliveryPlan::Document(PathBuf::from("clip.mp4")))
        );
    }

    #[test]
    fn uppercase_extension_still_counts_as_video() {
        let files = [FetchedFile::new("CLIP.MP4", 1024)];
        assert_eq!(
            DeliveryPlan::classify(&files),
            Some(DeliveryPlan::Video(PathBuf::from("CLIP.MP4")))
        );
    }

    #[test]
    fn single_non_video_is_document() {
        let files = [FetchedFile::new("cover.jpg", 1024)];
        assert_eq!(
            DeliveryPlan::classify(&files),
            Some(DeliveryPlan::Document(PathBuf::from("cover.jpg")))
        );
    }

    #[test]
    fn multiple_files_form_sorted_photo_group() {
        let files = [
            FetchedFile::new("b.jpg", 10),
            FetchedFile::new("a.jpg", 10),
        ];
        assert_eq!(
            DeliveryPlan::classify(&files),
            Some(DeliveryPlan::PhotoGroup(vec![
                PathBuf::from("a.jpg"),
                PathBuf::from("b.jpg"),
            ]))
        );
    }

    #[test]
    fn two_videos_are_still_a_photo_group() {
        // Multi-file results are always grouped as photos, even when the
        // backend produced video segments. Known edge case, preserved.
        let files = [
            FetchedFile::new("part2.mp4", 10),
            FetchedFile::new("part1.mp4", 10),
        ];
        let plan = DeliveryPlan::classify(&files).unwrap();
        assert_eq!(plan.kind(), DeliveryKind::PhotoGroup);
    }

    #[test]
    fn failed_outcome_has_no_files() {
        let outcome = FetchOutcome::Failed("boom".into());
        assert!(outcome.files().is_empty());
    }

    #[test]
    fn delivery_kind_labels() {
        assert_eq!(DeliveryKind::Video.to_string(), "video");
        assert_eq!(DeliveryKind::PhotoGroup.to_string(), "photo_group");
    }
}
