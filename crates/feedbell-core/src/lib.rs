//! Feedbell Core — shared types, configuration, and path utilities.
//!
//! This crate provides:
//! - **types**: `FeedItem` / `Enclosure` — the notification payload produced
//!   by the feed-ingestion side
//! - **config**: typed configuration schema + JSON/env loader
//! - **utils**: data-directory resolution helpers
//!
//! No network code lives here.

pub mod config;
pub mod types;
pub mod utils;

pub use types::{Enclosure, FeedItem};
