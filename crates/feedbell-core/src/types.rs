//! Feed item types — the payload handed to notification channels.
//!
//! Items arrive from upstream feed parsing with raw whitespace and HTML in
//! the title/description; nothing here assumes prior sanitization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single published feed item.
///
/// Only `title`, `description`, and `enclosure.url` participate in message
/// formatting; the remaining fields carry feed metadata through unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedItem {
    /// Item title, possibly padded with whitespace by the feed parser.
    pub title: String,
    /// Item description — an HTML fragment as published in the feed.
    pub description: String,
    /// Canonical link to the episode page.
    pub link: String,
    /// Feed-provided unique identifier.
    pub guid: String,
    /// Publication timestamp, when the feed carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<DateTime<Utc>>,
    /// Attached media resource.
    pub enclosure: Enclosure,
}

/// The item's attached media resource (typically audio).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Enclosure {
    /// Direct URL of the media file.
    pub url: String,
    /// MIME type as declared by the feed (e.g. "audio/mpeg").
    pub mime_type: String,
    /// Declared size in bytes, 0 when unknown.
    pub length: u64,
}

impl FeedItem {
    /// Create an item with just the fields that matter for notification.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        enclosure_url: impl Into<String>,
    ) -> Self {
        FeedItem {
            title: title.into(),
            description: description.into(),
            enclosure: Enclosure {
                url: enclosure_url.into(),
                ..Enclosure::default()
            },
            ..FeedItem::default()
        }
    }
}
