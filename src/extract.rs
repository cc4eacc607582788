//! Turning a parsed document into unseen, dated [`FeedItem`]s.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::source::{Document, Entry, FeedItem};

/// Extract the entries of `document` that are eligible for delivery.
///
/// An entry is dropped, silently, when its identifier is empty, already in
/// `seen`, or repeated earlier in the same document, or when its publish
/// time is missing or unparsable.  A document that turns out to be
/// structurally broken yields nothing and a warning.  Output is in document
/// order.
pub fn extract(
    document: Option<&Document>,
    feed_name: &str,
    seen: &HashSet<&str>,
) -> Vec<FeedItem> {
    let Some(document) = document else {
        return Vec::new();
    };

    match try_extract(document, feed_name, seen) {
        Ok(items) => {
            debug!(feed = feed_name, new = items.len(), "extracted items");
            items
        }
        Err(e) => {
            warn!(feed = feed_name, "could not read entries: {e}");
            Vec::new()
        }
    }
}

fn try_extract(
    document: &Document,
    feed_name: &str,
    seen: &HashSet<&str>,
) -> Result<Vec<FeedItem>, ExtractionError> {
    let items = match document {
        Document::Rss(channel) => collect_items(channel.items(), feed_name, seen),
        Document::Atom(atom) => collect_items(&atom.entries()?, feed_name, seen),
    };
    Ok(items)
}

fn collect_items<E: Entry>(entries: &[E], feed_name: &str, seen: &HashSet<&str>) -> Vec<FeedItem> {
    let mut taken: HashSet<&str> = HashSet::new();

    entries
        .iter()
        .filter_map(|entry| {
            let id = entry.identifier();
            if id.is_empty() || seen.contains(id) || !taken.insert(id) {
                return None;
            }
            let published = entry.published_at()?;

            Some(FeedItem {
                id: id.to_string(),
                title: entry.title().to_string(),
                link: entry.link().to_string(),
                published,
                source_name: feed_name.to_string(),
            })
        })
        .collect()
}
