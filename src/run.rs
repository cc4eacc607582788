//! One pass over all feeds.
//!
//! The run is strictly sequential: feeds are fetched one at a time in store
//! order, and a slow feed holds up everything behind it.  Per-feed problems
//! are logged and skipped; only storage and delivery failures stop the run.
//!
//! State is saved only after delivery succeeds, so an item whose delivery
//! failed stays unseen and is picked again next time.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::RunError;
use crate::extract::extract;
use crate::notify::Notifier;
use crate::select::select;
use crate::source::{fetch_document, FeedFetcher, FeedItem};
use crate::store::FeedStore;

/// How a run ended, when it didn't fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every feed was empty, unreachable or fully seen.  State untouched.
    NothingNew,
    /// The item was delivered and recorded as seen.
    Delivered(FeedItem),
    /// `--dry-run`: the item that would have been delivered.
    DryRun(FeedItem),
}

pub fn run(
    config: &Config,
    store: &FeedStore,
    fetcher: &dyn FeedFetcher,
    notifier: &dyn Notifier,
) -> Result<Outcome, RunError> {
    let mut feeds = store.load()?;
    debug!(path = %store.path().display(), feeds = feeds.len(), "starting run");

    let mut candidates = Vec::new();
    for feed in &feeds {
        let document = fetch_document(fetcher, &feed.name, &feed.url);
        candidates.extend(extract(document.as_ref(), &feed.name, &feed.seen_set()));
    }
    info!(feeds = feeds.len(), candidates = candidates.len(), "collected unseen items");

    let Some(item) = select(candidates) else {
        return Ok(Outcome::NothingNew);
    };

    if config.dry_run {
        return Ok(Outcome::DryRun(item));
    }

    notifier.notify(&item)?;

    if let Some(feed) = feeds.iter_mut().find(|f| f.name == item.source_name) {
        feed.mark_seen(&item.id);
    }
    store.save(&feeds)?;

    Ok(Outcome::Delivered(item))
}
