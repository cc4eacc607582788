//! Persisted feed list.
//!
//! The state file is a JSON array of `{name, url, seen}` records.  It is read
//! in full at the start of a run and rewritten in full at the end; there is
//! no locking, so only one run should touch a given file at a time.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::StorageError;

/// A configured feed and the identifiers already delivered from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    /// Unique within the store; shown as the item's source.
    pub name: String,
    pub url: String,
    /// Delivered identifiers, in delivery order.  Absent in hand-written
    /// files for feeds that have never delivered anything.
    #[serde(default)]
    pub seen: Vec<String>,
    /// Keys we don't interpret, kept so a save doesn't drop them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Feed {
    /// Borrowed lookup set over [`Feed::seen`].
    pub fn seen_set(&self) -> HashSet<&str> {
        self.seen.iter().map(String::as_str).collect()
    }

    /// Record `id` as delivered.  The seen list only ever grows; recording an
    /// identifier twice is a no-op.
    pub fn mark_seen(&mut self, id: &str) {
        if !self.seen.iter().any(|s| s == id) {
            self.seen.push(id.to_string());
        }
    }
}

/// File-backed feed list.
#[derive(Debug, Clone)]
pub struct FeedStore {
    path: PathBuf,
}

impl FeedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole feed list.  A missing or malformed file is an error, and
    /// so is a name used by more than one feed: delivered items are recorded
    /// against their feed by name.
    pub fn load(&self) -> Result<Vec<Feed>, StorageError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StorageError::Read {
            path: self.path.clone(),
            source,
        })?;
        let feeds: Vec<Feed> =
            serde_json::from_str(&raw).map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let mut names = HashSet::new();
        if let Some(dup) = feeds.iter().find(|f| !names.insert(f.name.as_str())) {
            return Err(StorageError::DuplicateName {
                path: self.path.clone(),
                name: dup.name.clone(),
            });
        }

        debug!(path = %self.path.display(), feeds = feeds.len(), "loaded feed list");
        Ok(feeds)
    }

    /// Overwrite the file with `feeds`, pretty-printed.
    pub fn save(&self, feeds: &[Feed]) -> Result<(), StorageError> {
        let mut body = serde_json::to_string_pretty(feeds).map_err(StorageError::Serialize)?;
        body.push('\n');
        fs::write(&self.path, body).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), feeds = feeds.len(), "saved feed list");
        Ok(())
    }
}
