//! HTTP implementation of [`FeedFetcher`].

use reqwest::blocking::Client;
use tracing::debug;

use super::{Document, FeedFetcher};
use crate::error::FetchError;

const USER_AGENT: &str = concat!("feed-relay/", env!("CARGO_PKG_VERSION"));

/// Fetches feeds with a blocking [`reqwest`] client.
///
/// No retries and no timeout beyond the client default: feeds are fetched
/// one after another and a hanging feed holds up the run.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl FeedFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes()?;
        debug!(url, bytes = body.len(), "fetched feed");
        Document::parse(body.as_ref())
    }
}
