//! Telegram client — bot session, recipient resolution, and dispatch.
//!
//! The client is constructed once from `{token, timeout}` and holds no
//! per-call mutable state, so `send` is safe to call concurrently. An empty
//! token yields a `Disabled` session: every send is a silent no-op, which
//! lets dry-run/disabled deployments skip notifications without branching
//! at call sites.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InputFile, ParseMode, Recipient as TgRecipient};
use tracing::debug;
use url::Url;

use feedbell_core::FeedItem;

use crate::base::Notifier;
use crate::formatting::message_html;

/// Timeout in seconds applied when the configured value is zero.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// A message ready for dispatch: composed caption plus attachment metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormattedMessage {
    /// Composed caption text (Telegram HTML subset).
    pub text: String,
    /// Enclosure URL to attach as audio.
    pub attachment_url: String,
    /// Display filename for the attachment; empty = let Telegram pick one.
    pub attachment_filename: String,
}

/// The wire-level send operation behind `TelegramClient`.
///
/// Production uses `teloxide`; tests substitute a recording stub.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// Deliver one HTML-formatted message with an audio attachment to a
    /// resolved recipient (always `@`-prefixed).
    async fn send_audio(&self, recipient: &str, message: &FormattedMessage) -> Result<()>;
}

/// Bot session state, fixed at construction.
enum BotSession {
    /// No token configured; sends are silently skipped.
    Disabled,
    /// Live transport.
    Enabled(Arc<dyn BotApi>),
}

/// Telegram notification client.
pub struct TelegramClient {
    session: BotSession,
    timeout: Duration,
}

impl TelegramClient {
    /// Create a client from a bot token and a timeout in seconds.
    ///
    /// An empty token yields a disabled client that never fails and never
    /// sends. A zero timeout falls back to [`DEFAULT_TIMEOUT_SECS`].
    pub fn new(token: &str, timeout_secs: u64) -> Result<Self> {
        let timeout = effective_timeout(timeout_secs);

        if token.is_empty() {
            debug!("telegram token empty, client disabled");
            return Ok(TelegramClient {
                session: BotSession::Disabled,
                timeout,
            });
        }

        let http: reqwest::Client = teloxide::net::default_reqwest_settings()
            .timeout(timeout)
            .build()?;
        let bot = Bot::with_client(token, http);

        Ok(TelegramClient {
            session: BotSession::Enabled(Arc::new(TeloxideApi { bot })),
            timeout,
        })
    }

    /// Create an enabled client over an arbitrary transport.
    ///
    /// The seam for tests and alternative `BotApi` implementations.
    pub fn with_api(api: Arc<dyn BotApi>, timeout_secs: u64) -> Self {
        TelegramClient {
            session: BotSession::Enabled(api),
            timeout: effective_timeout(timeout_secs),
        }
    }

    /// Whether the client holds a live session.
    pub fn is_enabled(&self) -> bool {
        matches!(self.session, BotSession::Enabled(_))
    }

    /// The effective per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send one feed item to a channel.
    ///
    /// Returns `Ok(())` without touching the transport when the client is
    /// disabled or `channel_id` is empty. Transport failures propagate
    /// verbatim; retries are the caller's concern.
    pub async fn send(&self, channel_id: &str, item: &FeedItem) -> Result<()> {
        let api = match &self.session {
            BotSession::Disabled => {
                debug!("telegram client disabled, skipping send");
                return Ok(());
            }
            BotSession::Enabled(api) => api,
        };

        if channel_id.is_empty() {
            debug!("telegram channel not configured, skipping send");
            return Ok(());
        }

        let recipient = resolve_recipient(channel_id);
        let message = FormattedMessage {
            text: message_html(item),
            attachment_url: item.enclosure.url.clone(),
            attachment_filename: filename_from_url(&item.enclosure.url),
        };

        api.send_audio(&recipient, &message).await?;
        debug!(channel = %recipient, title = %item.title.trim(), "telegram message sent");
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, channel_id: &str, item: &FeedItem) -> Result<()> {
        TelegramClient::send(self, channel_id, item).await
    }
}

/// Normalize a channel identifier into Telegram's addressing form.
///
/// Idempotent: the result always starts with `@`.
pub fn resolve_recipient(channel_id: &str) -> String {
    if channel_id.starts_with('@') {
        channel_id.to_string()
    } else {
        format!("@{channel_id}")
    }
}

/// Derive an attachment filename from an enclosure URL.
///
/// The final path segment, or an empty string when the path ends in `/`
/// (no filename) or the URL doesn't parse. Degraded naming is acceptable;
/// this never fails.
pub fn filename_from_url(raw: &str) -> String {
    let parsed = match Url::parse(raw) {
        Ok(u) => u,
        Err(_) => return String::new(),
    };

    let path = parsed.path();
    if path.ends_with('/') {
        return String::new();
    }

    path.rsplit('/').next().unwrap_or_default().to_string()
}

/// Apply the timeout default: zero means [`DEFAULT_TIMEOUT_SECS`].
fn effective_timeout(secs: u64) -> Duration {
    if secs == 0 {
        Duration::from_secs(DEFAULT_TIMEOUT_SECS)
    } else {
        Duration::from_secs(secs)
    }
}

// ─────────────────────────────────────────────
// teloxide transport
// ─────────────────────────────────────────────

/// Production transport over a `teloxide::Bot`.
struct TeloxideApi {
    bot: Bot,
}

#[async_trait]
impl BotApi for TeloxideApi {
    async fn send_audio(&self, recipient: &str, message: &FormattedMessage) -> Result<()> {
        let to = TgRecipient::ChannelUsername(recipient.to_string());

        match Url::parse(&message.attachment_url) {
            Ok(audio_url) => {
                let mut audio = InputFile::url(audio_url);
                if !message.attachment_filename.is_empty() {
                    audio = audio.file_name(message.attachment_filename.clone());
                }
                self.bot
                    .send_audio(to, audio)
                    .caption(message.text.clone())
                    .parse_mode(ParseMode::Html)
                    .await?;
            }
            Err(_) => {
                // enclosure URL unusable as an attachment; the composed text
                // still carries it as the final line
                self.bot
                    .send_message(to, message.text.clone())
                    .parse_mode(ParseMode::Html)
                    .await?;
            }
        }

        Ok(())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Mutex;

    /// Transport stub recording every invocation.
    struct RecordingApi {
        calls: Mutex<Vec<(String, FormattedMessage)>>,
    }

    impl RecordingApi {
        fn new() -> Arc<Self> {
            Arc::new(RecordingApi {
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl BotApi for RecordingApi {
        async fn send_audio(&self, recipient: &str, message: &FormattedMessage) -> Result<()> {
            let mut calls = self.calls.lock().await;
            calls.push((recipient.to_string(), message.clone()));
            Ok(())
        }
    }

    /// Transport stub that always rejects.
    struct FailingApi;

    #[async_trait]
    impl BotApi for FailingApi {
        async fn send_audio(&self, _recipient: &str, _message: &FormattedMessage) -> Result<()> {
            anyhow::bail!("telegram: 429 Too Many Requests")
        }
    }

    #[test]
    fn test_new_client_if_token_empty() {
        let client = TelegramClient::new("", 0).unwrap();
        assert!(!client.is_enabled());
    }

    #[test]
    fn test_new_client_check_timeout() {
        let cases: &[(u64, u64)] = &[(0, 600), (300, 300), (100500, 100500)];

        for &(timeout, expected) in cases {
            let client = TelegramClient::new("", timeout).unwrap();
            assert_eq!(client.timeout(), Duration::from_secs(expected));
        }
    }

    #[tokio::test]
    async fn test_send_if_disabled() {
        let client = TelegramClient::new("", 0).unwrap();
        let got = client.send("@channel", &FeedItem::default()).await;
        assert!(got.is_ok());
    }

    #[tokio::test]
    async fn test_send_if_channel_empty() {
        let api = RecordingApi::new();
        let client = TelegramClient::with_api(api.clone(), 0);

        let got = client.send("", &FeedItem::default()).await;

        assert!(got.is_ok());
        assert!(api.calls.lock().await.is_empty(), "no transport I/O expected");
    }

    #[tokio::test]
    async fn test_send_composes_and_resolves() {
        let api = RecordingApi::new();
        let client = TelegramClient::with_api(api.clone(), 0);

        let item = FeedItem::new(
            "\tPodcast\n\t",
            "<p>News <a href='#'>Podcast Link</a></p>\n",
            "https://example.com/100500/song.mp3",
        );
        client.send("channel", &item).await.unwrap();

        let calls = api.calls.lock().await;
        assert_eq!(calls.len(), 1);

        let (recipient, message) = &calls[0];
        assert_eq!(recipient, "@channel");
        assert_eq!(
            message.text,
            "Podcast\n\nNews <a href=\"#\">Podcast Link</a>\n\nhttps://example.com/100500/song.mp3"
        );
        assert_eq!(message.attachment_url, "https://example.com/100500/song.mp3");
        assert_eq!(message.attachment_filename, "song.mp3");
    }

    #[tokio::test]
    async fn test_send_transport_error_propagates() {
        let client = TelegramClient::with_api(Arc::new(FailingApi), 0);

        let got = client.send("@channel", &FeedItem::default()).await;

        assert!(got.is_err());
        assert!(got.unwrap_err().to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_send_via_notifier_trait() {
        let api = RecordingApi::new();
        let client = TelegramClient::with_api(api.clone(), 0);
        let notifier: &dyn Notifier = &client;

        assert_eq!(notifier.name(), "telegram");
        notifier
            .send("@channel", &FeedItem::new("t", "", "https://example.com/a.mp3"))
            .await
            .unwrap();
        assert_eq!(api.calls.lock().await.len(), 1);
    }

    #[test]
    fn test_recipient_channel_id_not_start_with_at() {
        for channel_id in ["channel", "@channel"] {
            assert_eq!(resolve_recipient(channel_id), "@channel");
        }
    }

    #[test]
    fn test_recipient_idempotent() {
        let once = resolve_recipient("mypodcast");
        assert_eq!(resolve_recipient(&once), once);
        assert!(once.starts_with('@'));
    }

    #[test]
    fn test_recipient_empty() {
        assert_eq!(resolve_recipient(""), "@");
    }

    #[test]
    fn test_filename_by_url() {
        let cases = [
            ("https://example.com/100500/song.mp3", "song.mp3"),
            ("https://example.com//song.mp3", "song.mp3"),
            ("https://example.com/song.mp3", "song.mp3"),
            ("https://example.com/song.mp3/", ""),
            ("https://example.com/", ""),
            ("https://example.com", ""),
            ("not a url", ""),
        ];

        for (url, expected) in cases {
            assert_eq!(filename_from_url(url), expected, "url: {url}");
        }
    }
}
