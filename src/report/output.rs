// src/report/output.rs
// =============================================================================
// Writes the collected results to a JSON file.
//
// The output is an array of records:
//   [{"url": "...", "status": "UP", "timestamp": "2024-01-02T03:04:05.123Z"}, ...]
//
// This runs once, after every check has finished, so nothing else can be
// touching the file at the same time. No locking is needed.
// =============================================================================

use crate::error::{UptimeError, UptimeResult};
use crate::probe::UrlStatus;
use std::fs;
use std::path::Path;

// Serializes results as a pretty-printed JSON array
pub fn to_json(results: &[UrlStatus]) -> UptimeResult<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

// Writes results to `path`, replacing whatever was there
pub fn write_results(path: &Path, results: &[UrlStatus]) -> UptimeResult<()> {
    let json = to_json(results)?;

    fs::write(path, json).map_err(|source| UptimeError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("wrote {} record(s) to {}", results.len(), path.display());
    Ok(())
}
