//! Command-line arguments for the quotation client.
//!
//! This module defines the CLI interface using `clap`. Every flag has a default, so
//! running the binary without arguments queries the local server with the stock budget.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use quotation_common::net::{CLIENT_TIMEOUT, SERVER_PORT, quotation_url};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// URL of the quotation route on the local server.
    #[clap(long, default_value_t = quotation_url("localhost", SERVER_PORT))]
    pub url: String,

    /// Budget of the whole call, in milliseconds.
    #[clap(long, default_value_t = CLIENT_TIMEOUT.as_millis() as u64)]
    pub timeout_ms: u64,

    /// File the quotation is appended to.
    #[clap(long, default_value = "cotacao.txt")]
    pub output: String,
}

impl Args {
    /// Budget of the whole call.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Output path with surrounding whitespace and matching quotes removed.
    pub fn output_path(&self) -> PathBuf {
        normalize_path(&self.output)
    }
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
