//! Configuration schema — typed settings for the notification channels.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.feedbell/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub telegram: TelegramConfig,
}

// ─────────────────────────────────────────────
// Telegram
// ─────────────────────────────────────────────

/// Telegram notification config.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TelegramConfig {
    /// Bot token from @BotFather. Empty = notifications disabled.
    #[serde(default)]
    pub token: String,
    /// Destination channel, with or without the leading `@`.
    /// Empty = sends are silently skipped.
    #[serde(default)]
    pub channel: String,
    /// Per-request timeout in seconds. 0 = the client applies its default (600).
    #[serde(default)]
    pub timeout: u64,
}

impl TelegramConfig {
    /// Whether this channel has a configured bot token.
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
