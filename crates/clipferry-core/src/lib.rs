// SPDX-FileCopyrightText: 2026 Clipferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the clipferry media relay.
//!
//! This crate provides the shared error type, the media fetch/delivery
//! types, and the [`MediaFetcher`] trait implemented by the extraction
//! backend. Everything here is channel-agnostic: the Telegram crate
//! consumes these types but nothing in this crate knows about Telegram.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RelayError;
pub use traits::MediaFetcher;
pub use types::{DeliveryKind, DeliveryPlan, FetchOutcome, FetchedFile};
