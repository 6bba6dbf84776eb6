// src/probe/mod.rs
// =============================================================================
// This module contains all URL probing logic.
//
// Submodules:
// - check: Checks one URL and produces a UrlStatus
// - dispatch: Runs many checks concurrently and collects the results
//
// This file also builds the shared HTTP client, so that every check in a
// run reuses the same connection pool.
// =============================================================================

mod check;
mod dispatch;

pub use check::{Status, UrlStatus};
pub use dispatch::{run_all, Concurrency};

use reqwest::Client;
use std::time::Duration;

// Builds the HTTP client used for every check in a run
//
// Parameters:
//   timeout: optional per-request deadline. None keeps reqwest's defaults,
//            which means no deadline at all.
pub fn build_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut builder = Client::builder().user_agent(concat!("uptime-probe/", env!("CARGO_PKG_VERSION")));

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

// Returns a URL on localhost where nothing is listening
//
// Port 1 is privileged and never handed out as an ephemeral port, so a
// MockServer started by another test can't end up answering on it.
#[cfg(test)]
pub(crate) fn refused_url() -> String {
    "http://127.0.0.1:1/".to_string()
}
