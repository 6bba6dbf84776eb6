// src/report/input.rs
// Reads the list of URLs to check: one per line, taken as-is.

use crate::error::{UptimeError, UptimeResult};
use std::fs;
use std::path::Path;

// Loads the URL list from a text file
//
// Every line becomes one URL. Nothing is trimmed or validated, and blank
// lines are kept: they simply come back DOWN when checked.
pub fn load_urls(path: &Path) -> UptimeResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| UptimeError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    let urls = parse_urls(&content);
    log::debug!("read {} url(s) from {}", urls.len(), path.display());
    Ok(urls)
}

// Splits file content into URLs, one per line
//
// Both "\n" and "\r\n" line endings work. A trailing newline at the end of
// the file does not produce an extra empty entry.
pub fn parse_urls(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}
