//! Uniform view over one entry of either feed dialect.
//!
//! RSS items come straight from the [`rss`] crate; Atom entries are built by
//! the walker in [`super::atom`].  The extractor only ever talks to
//! [`Entry`], so adding a dialect means implementing this trait and teaching
//! [`super::Document`] to recognise its root element.

use chrono::{DateTime, FixedOffset};

/// Read-only accessors the extractor needs from an entry.
pub trait Entry {
    /// Stable identifier (`<guid>` / `<id>`), empty when the feed gave none.
    fn identifier(&self) -> &str;

    /// Headline, empty when absent.
    fn title(&self) -> &str;

    /// Link to the full content, empty when absent.
    fn link(&self) -> &str;

    /// Publish time (`<pubDate>` / `<published>`), `None` if absent or
    /// unparsable.
    fn published_at(&self) -> Option<DateTime<FixedOffset>>;
}

impl Entry for rss::Item {
    fn identifier(&self) -> &str {
        self.guid().map(|g| g.value().trim()).unwrap_or_default()
    }

    fn title(&self) -> &str {
        rss::Item::title(self).unwrap_or_default()
    }

    fn link(&self) -> &str {
        rss::Item::link(self).map(str::trim).unwrap_or_default()
    }

    fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        self.pub_date().and_then(parse_timestamp)
    }
}

/// Parse a feed date.  RSS mandates RFC 2822 and Atom RFC 3339, but plenty of
/// feeds mix them up, so both are accepted for either dialect.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}
