// src/error.rs
// =============================================================================
// Errors that can happen at the edges of the program: reading the URL list
// and writing the result file.
//
// Network failures are NOT errors here. A URL that cannot be reached is just
// data (Status::Down), so the probe code never produces an UptimeError.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UptimeError {
    #[error("could not read URL list from {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write results to {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type UptimeResult<T> = Result<T, UptimeError>;
