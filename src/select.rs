//! Which item gets delivered this run.

use crate::source::FeedItem;

/// Pick the item with the earliest publish time.
///
/// Ties go to the first minimal item in input order, which the run builds as
/// feed-list order followed by document order.
pub fn select(items: Vec<FeedItem>) -> Option<FeedItem> {
    // `min_by_key` keeps the first of several equal minima.
    items.into_iter().min_by_key(|item| item.published)
}
