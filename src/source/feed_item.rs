//! The normalized item shared by both feed dialects.
//!
//! A `FeedItem` only exists for an entry that had a non-empty identifier not
//! yet seen on its feed and a publish timestamp that parsed.  Everything
//! downstream (selection, notification, marking seen) can rely on that.

use chrono::{DateTime, FixedOffset};

/// One unseen, dated entry from a feed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FeedItem {
    /// `<guid>` for RSS, `<id>` for Atom.  Never empty.
    pub id: String,

    /// Headline; may be empty.
    pub title: String,

    /// URL of the full content; may be empty.
    pub link: String,

    /// Publication time with the offset the feed declared.  Comparisons are
    /// by instant, so items from feeds in different zones order correctly.
    pub published: DateTime<FixedOffset>,

    /// Name of the feed this came from, as recorded in the store.
    pub source_name: String,
}
