//! Notifier trait — the abstract interface the feed-ingestion side
//! programs against.
//!
//! The ingester decides *when* an item is new; a `Notifier` decides *how*
//! it reaches a destination. One notification per item, no ordering
//! guarantees between calls.

use async_trait::async_trait;
use feedbell_core::FeedItem;

/// Every notification channel implements this trait.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Unique channel name (e.g. "telegram").
    fn name(&self) -> &str;

    /// Deliver one feed item to a destination.
    ///
    /// An empty `channel_id` or an unconfigured channel is not an error;
    /// the send is silently skipped. Transport failures surface here.
    async fn send(&self, channel_id: &str, item: &FeedItem) -> anyhow::Result<()>;
}
