//! Feed HTML → Telegram HTML reduction and message composition.
//!
//! Telegram's rich-text renderer accepts only a small tag subset, and feed
//! descriptions arrive with arbitrary markup (lists, paragraphs, emphasis).
//! For notifications we keep exactly one tag — the hyperlink anchor — and
//! strip everything else down to its inner text.
//!
//! The reduction is a streaming tag classifier, not a general HTML parser:
//! the input is walked as alternating text/tag tokens and each tag is either
//! re-emitted (anchors) or dropped. Text between tags, including all
//! whitespace and newlines, passes through untouched, so the line structure
//! of list items survives via the newlines already present in the feed.

use feedbell_core::FeedItem;

/// Reduce an HTML fragment to the anchor-only subset Telegram supports.
///
/// Rules:
/// - `<a ...>` is re-emitted as `<a href="...">` — only the `href` attribute
///   survives, quoting normalized to double quotes. `</a>` is kept as-is.
/// - Every other tag is dropped; its inner text is preserved.
/// - A `<` not starting a tag (not followed by a letter, or by `/` and a
///   letter) is literal text. An unterminated tag is emitted as text.
///
/// Classification is per-tag, so emphasis nested inside a kept anchor is
/// still dropped while the anchor itself survives.
///
/// Total function; never fails.
pub fn sanitize_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tag = &rest[lt..];

        if !looks_like_tag(tag) {
            out.push('<');
            rest = &tag[1..];
            continue;
        }

        match tag.find('>') {
            Some(gt) => {
                rewrite_tag(&tag[1..gt], &mut out);
                rest = &tag[gt + 1..];
            }
            None => {
                // unterminated tag at end of input
                out.push_str(tag);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Whether the text starting at `<` plausibly opens a tag:
/// `<name` or `</name` with an ASCII letter.
fn looks_like_tag(s: &str) -> bool {
    let mut chars = s[1..].chars();
    match chars.next() {
        Some('/') => chars.next().is_some_and(|c| c.is_ascii_alphabetic()),
        Some(c) => c.is_ascii_alphabetic(),
        None => false,
    }
}

/// Re-emit an anchor tag with normalized quoting, drop anything else.
///
/// `body` is the tag content without the surrounding angle brackets.
fn rewrite_tag(body: &str, out: &mut String) {
    let closing = body.starts_with('/');
    let name: String = body
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();

    if !name.eq_ignore_ascii_case("a") {
        return;
    }

    if closing {
        out.push_str("</a>");
        return;
    }

    match extract_href(body) {
        Some(href) => {
            out.push_str("<a href=\"");
            out.push_str(href);
            out.push_str("\">");
        }
        None => out.push_str("<a>"),
    }
}

/// Pull the `href` value out of an anchor tag body.
///
/// Accepts double-quoted, single-quoted, and unquoted values.
fn extract_href(body: &str) -> Option<&str> {
    let lower = body.to_ascii_lowercase();
    let bytes = body.as_bytes();
    let mut search = 0;

    while let Some(pos) = lower[search..].find("href") {
        let idx = search + pos;
        search = idx + 4;

        // must be a standalone attribute name
        if idx > 0 && bytes[idx - 1].is_ascii_alphanumeric() {
            continue;
        }

        let mut i = idx + 4;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            return Some("");
        }

        return match bytes[i] {
            q @ (b'"' | b'\'') => {
                let start = i + 1;
                let end = body[start..]
                    .find(q as char)
                    .map_or(body.len(), |e| start + e);
                Some(&body[start..end])
            }
            _ => {
                let end = body[i..]
                    .find(|c: char| c.is_ascii_whitespace())
                    .map_or(body.len(), |e| i + e);
                Some(&body[i..end])
            }
        };
    }

    None
}

/// Compose the outbound notification text for a feed item.
///
/// Layout: trimmed title, blank line, sanitized description (one trailing
/// newline stripped), blank line, bare enclosure URL — Telegram renders the
/// bare URL as a preview/link.
///
/// Total function; an item with empty fields still yields a string.
pub fn message_html(item: &FeedItem) -> String {
    let title = item.title.trim();
    let description = sanitize_html(&item.description);
    let description = description.strip_suffix('\n').unwrap_or(&description);

    format!("{title}\n\n{description}\n\n{}", item.enclosure.url)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
