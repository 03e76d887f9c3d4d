//! Feedbell Telegram — the notification dispatch adapter.
//!
//! This crate provides:
//! - **base**: The `Notifier` trait the feed-ingestion side programs against
//! - **formatting**: HTML reduction to Telegram's tag subset + message composition
//! - **client**: `TelegramClient` — bot session, recipient resolution, and dispatch

pub mod base;
pub mod client;
pub mod formatting;

pub use base::Notifier;
pub use client::{FormattedMessage, TelegramClient};
