// src/report/mod.rs
// =============================================================================
// File I/O on both ends of a run.
//
// Submodules:
// - input: Reads the newline-delimited URL list
// - output: Writes the JSON result file
// =============================================================================

mod input;
mod output;

pub use input::load_urls;
pub use output::{to_json, write_results};
