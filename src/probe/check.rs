// src/probe/check.rs
// =============================================================================
// This module checks whether a single URL is reachable.
//
// Key functionality:
// - Makes exactly one HTTP GET request per URL
// - Any response at all (200, 404, 500...) counts as UP
// - Any failure to get a response (bad URL, DNS, refused, TLS...) counts as DOWN
// - Never returns an error: failures become data
//
// Rust concepts:
// - async/await: For non-blocking network I/O
// - Enums: To represent the two possible outcomes
// - Drop: Releasing the HTTP response as soon as we know we got one
// =============================================================================

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

// The outcome of a check. There are only two.
//
// rename_all = "UPPERCASE" makes these serialize as "UP" and "DOWN"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// A response was received (any status code)
    Up,
    /// The request failed for any reason
    Down,
}

impl Status {
    /// Maps "did the request produce a response?" onto a status.
    pub fn from_outcome(got_response: bool) -> Self {
        if got_response {
            Status::Up
        } else {
            Status::Down
        }
    }
}

// One record per checked URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UrlStatus {
    /// The URL exactly as it appeared in the input
    pub url: String,
    pub status: Status,
    /// When the check finished
    pub timestamp: DateTime<Utc>,
}

impl UrlStatus {
    pub fn is_up(&self) -> bool {
        self.status == Status::Up
    }
}

// Checks a single URL
//
// Parameters:
//   client: shared reqwest client (connection pool lives inside it)
//   url: the URL to check, not validated - a malformed URL is simply DOWN
//
// Returns: UrlStatus stamped with the time the request resolved
pub async fn check_url(client: &Client, url: &str) -> UrlStatus {
    // A malformed URL doesn't panic here; reqwest stores the parse error
    // in the builder and hands it back from send()
    let result = client.get(url).send().await;

    let got_response = match result {
        Ok(response) => {
            log::debug!("{} -> HTTP {}", url, response.status().as_u16());
            // The body is never read. Dropping the response hands the
            // connection back to the pool (or closes it) right away.
            drop(response);
            true
        }
        Err(e) => {
            log::debug!("{} -> {}", url, e);
            false
        }
    };

    UrlStatus {
        url: url.to_string(),
        status: Status::from_outcome(got_response),
        timestamp: Utc::now(),
    }
}
