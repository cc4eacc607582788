//! Delivering the selected item to the messaging endpoint.

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::error::DeliveryError;
use crate::source::FeedItem;

/// Something that can deliver one item.
pub trait Notifier {
    fn notify(&self, item: &FeedItem) -> Result<(), DeliveryError>;
}

/// JSON body accepted by the messaging API.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Message<'a> {
    pub to: &'a str,
    pub body: String,
}

/// Two lines: the title in bold, then the link.
pub fn format_message(item: &FeedItem) -> String {
    format!("**{}**\n{}", item.title, item.link)
}

/// Posts messages to the configured endpoint with bearer authentication.
pub struct HttpNotifier<'a> {
    client: Client,
    config: &'a Config,
}

impl<'a> HttpNotifier<'a> {
    pub fn new(config: &'a Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().build()?,
            config,
        })
    }
}

impl Notifier for HttpNotifier<'_> {
    fn notify(&self, item: &FeedItem) -> Result<(), DeliveryError> {
        let message = Message {
            to: &self.config.channel,
            body: format_message(item),
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.config.api_token)
            .json(&message)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!(id = %item.id, feed = %item.source_name, %status, "delivered item");
        Ok(())
    }
}
