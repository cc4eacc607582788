//! Process configuration, built once in `main` and passed down by reference.

use std::fmt;
use std::path::PathBuf;

use clap::Parser;

use crate::error::ConfigError;

/// Bearer token for the messaging API.
pub const TOKEN_VAR: &str = "RELAY_API_TOKEN";
/// Destination channel identifier.
pub const CHANNEL_VAR: &str = "RELAY_CHANNEL";
/// Optional override for [`DEFAULT_ENDPOINT`].
pub const ENDPOINT_VAR: &str = "RELAY_ENDPOINT";

/// Where messages are posted unless `RELAY_ENDPOINT` says otherwise.
pub const DEFAULT_ENDPOINT: &str = "https://api.relay-messaging.com/v1/messages";

/// Command-line flags.
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Relay the oldest unseen feed entry to a messaging channel")]
pub struct Cli {
    /// JSON file holding the feed list and delivered identifiers.
    #[arg(long, value_name = "PATH", default_value = "feeds.json")]
    pub state: PathBuf,

    /// Select and print the next item without sending it or updating state.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Clone)]
pub struct Config {
    pub api_token: String,
    pub channel: String,
    pub endpoint: String,
    pub state_path: PathBuf,
    pub dry_run: bool,
}

impl Config {
    /// Build from the process environment.
    pub fn from_env(cli: Cli) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), cli)
    }

    /// Build from an arbitrary variable lookup.  Required values that are
    /// absent or blank are a [`ConfigError::Missing`].
    pub fn from_lookup<F>(lookup: F, cli: Cli) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| value(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            api_token: required(TOKEN_VAR)?,
            channel: required(CHANNEL_VAR)?,
            endpoint: value(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            state_path: cli.state,
            dry_run: cli.dry_run,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &"***")
            .field("channel", &self.channel)
            .field("endpoint", &self.endpoint)
            .field("state_path", &self.state_path)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}
