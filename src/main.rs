//! feed-relay — forwards the oldest unseen feed entry to a messaging channel.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐ load  ┌──────────┐ fetch  ┌───────────┐ extract ┌───────────┐
//! │ store.rs │ ────► │  run.rs  │ ─────► │  source/  │ ──────► │ extract.rs│
//! └──────────┘ ◄──── └──────────┘        └───────────┘         └───────────┘
//!               save      │   select() ┌───────────┐  notify() ┌───────────┐
//!                         └──────────► │ select.rs │ ────────► │ notify.rs │
//!                                      └───────────┘           └───────────┘
//! ```
//!
//! * **`config`** — environment + flags, validated before anything touches the
//!   network.
//! * **`store`** — the JSON feed list with each feed's delivered identifiers.
//! * **`source/`** — fetching, dialect sniffing, and the RSS/Atom entry
//!   adapters.
//! * **`extract`** — unseen, dated entries → `FeedItem`s.
//! * **`select`** — earliest item wins.
//! * **`notify`** — the outbound POST.
//! * **`run`** — wires one pass together; saves only after delivery.
//! * **`main`** — logging, config, exit codes.

mod config;
mod error;
mod extract;
mod notify;
mod run;
mod select;
mod source;
mod store;
#[cfg(test)]
mod test_server;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use config::{Cli, Config};
use error::RunError;
use notify::HttpNotifier;
use run::Outcome;
use source::HttpFetcher;
use store::FeedStore;

/// Missing configuration.
const EXIT_CONFIG: u8 = 2;
/// Storage or delivery failure.
const EXIT_FAILURE: u8 = 1;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    // -- configuration: refuse to start before any network access ------------
    let config = match Config::from_env(cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    match relay(&config) {
        Ok(Outcome::NothingNew) => {
            println!("no new items");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Delivered(item)) => {
            println!("delivered: {} ({})", item.title, item.source_name);
            ExitCode::SUCCESS
        }
        Ok(Outcome::DryRun(item)) => {
            println!(
                "would deliver: {} ({}, {})\n{}",
                item.title,
                item.source_name,
                item.published.to_rfc3339(),
                item.link
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn relay(config: &Config) -> anyhow::Result<Outcome> {
    let store = FeedStore::new(&config.state_path);
    let fetcher = HttpFetcher::new().context("building feed client")?;
    let notifier = HttpNotifier::new(config).context("building messaging client")?;

    run::run(config, &store, &fetcher, &notifier).map_err(|e| match e {
        RunError::Delivery(_) => anyhow::Error::new(e).context("message delivery failed"),
        RunError::Storage(_) => anyhow::Error::new(e).context("feed state unavailable"),
    })
}
