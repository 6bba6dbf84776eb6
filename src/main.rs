// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Read the URL list
// 4. Check every URL concurrently and collect the results
// 5. Print the results and write them to the output file
// 6. Exit with proper code (0 = run completed, 2 = error)
//
// Rust concepts used:
// - async/await: Because we need to make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different outcomes
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod error;    // src/error.rs - file I/O errors
mod probe;    // src/probe/ - URL checking logic
mod report;   // src/report/ - reading the URL list, writing results

use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;
use log::LevelFilter;
use probe::{Concurrency, Status, UrlStatus};

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::{Context, Result};

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // If something fatal happened, print it and exit with code 2
            // {:#} prints the whole error chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Sets up env_logger
//
// -v / -vv raise the default level, and RUST_LOG (if set) wins over both
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .filter_module("hyper", LevelFilter::Warn)
        .filter_module("reqwest", LevelFilter::Warn)
        .parse_default_env()
        .init();
}

// This is the main application logic
// Returns:
//   Ok(0) = run completed (some URLs may be DOWN, the output file may be missing)
//   Err = fatal error, nothing was checked
async fn run(cli: Cli) -> Result<i32> {
    // An unreadable URL list aborts the run before any network activity
    let urls = report::load_urls(&cli.input)?;

    println!("🔍 Checking {} url(s) from {}", urls.len(), cli.input.display());

    // One client for the whole run so connections get reused
    let client = probe::build_client(cli.timeout()).context("failed to create HTTP client")?;

    let results = probe::run_all(&client, urls, Concurrency::from(cli.concurrency)).await;

    // Like a failed write below, a failed printout shouldn't cost us the file
    if let Err(e) = print_results(&results, cli.json) {
        log::error!("{:#}", e);
        eprintln!("Error printing results: {:#}", e);
    }

    // A failed write is reported, but the run itself still counts as done:
    // the results were collected, they just didn't persist
    match report::write_results(&cli.output, &results) {
        Ok(()) => println!("📝 Results logged to {}", cli.output.display()),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error creating output file: {}", e);
        }
    }

    Ok(0)
}

// Prints the results either as a table or JSON
// Parameters:
//   results: slice of UrlStatus records
//   json: whether to output JSON format
fn print_results(results: &[UrlStatus], json: bool) -> Result<()> {
    if json {
        println!("{}", report::to_json(results)?);
    } else {
        print_table(results);
    }
    Ok(())
}

// Prints results as a human-readable table in the terminal
fn print_table(results: &[UrlStatus]) {
    println!("{:<60} {:<10} {:<30}", "URL", "STATUS", "CHECKED AT");
    println!("{}", "=".repeat(100));

    for result in results {
        // Truncate URL if too long for display
        // (counting chars, not bytes, so multi-byte URLs can't split mid-character)
        let url_display = if result.url.chars().count() > 57 {
            format!("{}...", result.url.chars().take(57).collect::<String>())
        } else {
            result.url.clone()
        };

        println!(
            "{:<60} {:<10} {:<30}",
            url_display,
            format_status(result.status),
            result.timestamp.to_rfc3339()
        );
    }

    println!();

    let up_count = results.iter().filter(|r| r.is_up()).count();

    println!("📊 Summary:");
    println!("   ✅ UP: {}", up_count);
    println!("   ❌ DOWN: {}", results.len() - up_count);
    println!("   📋 Total: {}", results.len());
}

fn format_status(status: Status) -> &'static str {
    match status {
        Status::Up => "✅ UP",
        Status::Down => "❌ DOWN",
    }
}
