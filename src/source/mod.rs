//! Feed-side abstraction layer.
//!
//! This module defines the [`FeedFetcher`] trait, the parsed [`Document`]
//! and the dialect-neutral [`Entry`] view the extractor works against.
//! Concrete pieces live in sub-modules:
//!
//! * [`http`] — the real fetcher, a blocking `reqwest` client.
//! * [`document`] — root-element sniffing and the RSS dialect.
//! * [`atom`] — the Atom dialect.
//! * [`entry`] — the [`Entry`] trait and the RSS implementation of it.
//!
//! ## Adding a dialect
//!
//! 1. Add a variant to [`Document`] and match its root element in
//!    `Document::parse`.
//! 2. Implement [`Entry`] for its entry type.
//! 3. Handle the variant in `extract::extract`.

mod atom;
mod document;
mod entry;
mod feed_item;
mod http;

pub use document::Document;
pub use entry::Entry;
pub use feed_item::FeedItem;
pub use http::HttpFetcher;

#[cfg(test)]
pub(crate) use feed_item::tests::make_item;

use tracing::{debug, warn};

use crate::error::FetchError;

/// Anything that can turn a feed URL into a parsed [`Document`].
///
/// The run calls [`fetch()`](FeedFetcher::fetch) once per configured feed,
/// in store order, on the main thread.
pub trait FeedFetcher {
    fn fetch(&self, url: &str) -> Result<Document, FetchError>;
}

/// Fetch one feed, logging and swallowing any failure.
///
/// A feed that can't be fetched or parsed contributes nothing to this run;
/// it never aborts the other feeds.
pub fn fetch_document(fetcher: &dyn FeedFetcher, feed_name: &str, url: &str) -> Option<Document> {
    match fetcher.fetch(url) {
        Ok(document) => {
            debug!(feed = feed_name, dialect = document.dialect(), "parsed feed");
            Some(document)
        }
        Err(e) => {
            warn!(feed = feed_name, url, "skipping feed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl FeedFetcher for Failing {
        fn fetch(&self, _url: &str) -> Result<Document, FetchError> {
            Err(FetchError::Status(reqwest::StatusCode::NOT_FOUND))
        }
    }

    struct Fixed(&'static str);

    impl FeedFetcher for Fixed {
        fn fetch(&self, _url: &str) -> Result<Document, FetchError> {
            Document::parse(self.0.as_bytes())
        }
    }

    #[test]
    fn failures_become_none() {
        assert!(fetch_document(&Failing, "broken", "https://example.com/404").is_none());
        assert!(fetch_document(&Fixed("not xml"), "garbage", "https://example.com/x").is_none());
    }

    #[test]
    fn successes_pass_through() {
        let doc = fetch_document(&Fixed("<feed></feed>"), "atom", "https://example.com/atom");
        assert!(matches!(doc, Some(Document::Atom(_))));
    }
}
