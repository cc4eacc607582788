//! Error taxonomy.
//!
//! Only [`ConfigError`], [`StorageError`] and [`DeliveryError`] ever end a
//! run.  [`FetchError`] and [`ExtractionError`] are caught at the feed
//! boundary, logged, and turned into "this feed contributes nothing".

use std::path::PathBuf;

use thiserror::Error;

/// Required settings are missing at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// The persisted feed list could not be read or written.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed feed list in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("feed name {name:?} appears more than once in {path}")]
    DuplicateName { path: PathBuf, name: String },

    #[error("failed to serialize feed list: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single feed could not be retrieved or parsed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {0}")]
    Status(reqwest::StatusCode),

    #[error("unparsable feed body: {0}")]
    Parse(String),
}

/// A parsed document turned out to be structurally broken while walking
/// its entries.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("malformed XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("document ended inside an <{0}> element")]
    Truncated(&'static str),
}

/// The messaging endpoint refused or never received the message.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint answered {status}: {body}")]
    Status { status: u16, body: String },
}

/// Errors that abort a run after configuration succeeded.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
