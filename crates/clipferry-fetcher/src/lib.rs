// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction backend for the clipferry media relay.
//!
//! Provides the per-request [`Workspace`] scratch directory with guaranteed
//! teardown semantics, and [`YtDlpFetcher`], the [`MediaFetcher`]
//! implementation that drives the external yt-dlp binary.
//!
//! [`MediaFetcher`]: clipferry_core::MediaFetcher

pub mod workspace;
pub mod ytdlp;

pub use workspace::Workspace;
pub use ytdlp::YtDlpFetcher;
