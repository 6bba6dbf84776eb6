// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Every option has a default, so running `uptime-probe` with no arguments
// reads urls.txt and writes userfile.json in the current directory.
// =============================================================================

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "uptime-probe",
    version = "0.1.0",
    about = "Check a list of URLs concurrently and record which are up or down",
    long_about = "uptime-probe reads a list of URLs (one per line), checks every one of them at the same time, \
                  and writes each URL's UP/DOWN status with a timestamp to a JSON file. \
                  A URL is UP if it answered with any HTTP response at all, DOWN otherwise."
)]
pub struct Cli {
    /// File with one URL per line
    #[arg(short, long, default_value = "urls.txt")]
    pub input: PathBuf,

    /// Where to write the JSON results
    #[arg(short, long, default_value = "userfile.json")]
    pub output: PathBuf,

    /// Maximum number of checks in flight at once
    ///
    /// 0 removes the limit and starts one task per URL, every check at once
    #[arg(short, long, default_value_t = 64)]
    pub concurrency: usize,

    /// Per-request timeout in seconds (default: no timeout)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Print results as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// More log output (-v for info, -vv for debug)
    ///
    /// ArgAction::Count turns repeated flags into a number
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}
