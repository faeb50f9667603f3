//! Command-line arguments for the quotation server.
//!
//! Every flag has a default, so the binary runs without arguments.
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use quotation_common::currency::CurrencyPair;
use quotation_common::net::{
    FETCH_TIMEOUT, MAX_BUDGET, PERSIST_TIMEOUT, REQUEST_CEILING, SERVER_PORT, UPSTREAM_BASE_URL,
    addr,
};
use quotation_common::{QuotationError, Result};

use crate::config::{DeadlinePolicy, ServerConfig};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Address the HTTP listener binds to.
    #[clap(long, default_value_t = addr("0.0.0.0", SERVER_PORT))]
    pub bind: String,

    /// Base URL of the quotation provider; the pair is appended as a path segment.
    #[clap(long, default_value = UPSTREAM_BASE_URL)]
    pub upstream_url: String,

    /// Currency pair to quote.
    #[clap(long, value_enum, default_value_t = CurrencyPair::UsdBrl)]
    pub pair: CurrencyPair,

    /// SQLite database file.
    #[clap(long, default_value = "quotation.db")]
    pub database: PathBuf,

    /// Number of pooled datastore connections.
    #[clap(long, default_value_t = 4)]
    pub pool_size: u32,

    /// Largest budget granted to one request, in milliseconds.
    #[clap(long, default_value_t = REQUEST_CEILING.as_millis() as u64)]
    pub request_budget_ms: u64,

    /// Upper bound of the upstream fetch, in milliseconds.
    #[clap(long, default_value_t = FETCH_TIMEOUT.as_millis() as u64)]
    pub fetch_timeout_ms: u64,

    /// Upper bound of the datastore insert, in milliseconds.
    #[clap(long, default_value_t = PERSIST_TIMEOUT.as_millis() as u64)]
    pub persist_timeout_ms: u64,
}

impl Args {
    /// Validate the arguments and build a [`ServerConfig`].
    pub fn into_config(self) -> Result<ServerConfig> {
        let bind_addr: SocketAddr = self
            .bind
            .trim()
            .parse()
            .map_err(|e| QuotationError::Config(format!("invalid bind address {:?}: {}", self.bind, e)))?;
        if self.pool_size == 0 {
            return Err(QuotationError::Config("pool size must be at least 1".into()));
        }

        Ok(ServerConfig {
            bind_addr,
            upstream_base_url: self.upstream_url,
            pair: self.pair,
            database: self.database,
            pool_size: self.pool_size,
            deadlines: DeadlinePolicy {
                request_ceiling: budget("request-budget-ms", self.request_budget_ms)?,
                fetch_cap: budget("fetch-timeout-ms", self.fetch_timeout_ms)?,
                persist_cap: budget("persist-timeout-ms", self.persist_timeout_ms)?,
            },
        })
    }
}

fn budget(flag: &str, millis: u64) -> Result<Duration> {
    let budget = Duration::from_millis(millis);
    if budget > MAX_BUDGET {
        return Err(QuotationError::Config(format!(
            "--{} must be at most {} ms, got {}",
            flag,
            MAX_BUDGET.as_millis(),
            millis
        )));
    }
    Ok(budget)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = Args::parse_from(["quotation_server"]).into_config().unwrap();
        assert_eq!(config.bind_addr.port(), SERVER_PORT);
        assert_eq!(config.pair, CurrencyPair::UsdBrl);
        assert_eq!(config.deadlines, DeadlinePolicy::default());
    }

    #[test]
    fn flags_override_defaults() {
        let config = Args::parse_from([
            "quotation_server",
            "--bind",
            "127.0.0.1:9000",
            "--pair",
            "EUR-BRL",
            "--fetch-timeout-ms",
            "500",
        ])
        .into_config()
        .unwrap();
        assert_eq!(config.listen_addr(), "127.0.0.1:9000");
        assert_eq!(config.pair, CurrencyPair::EurBrl);
        assert_eq!(config.deadlines.fetch_cap, Duration::from_millis(500));
    }

    #[test]
    fn oversized_budget_is_a_config_error() {
        let max = u64::MAX.to_string();
        for flag in ["--request-budget-ms", "--fetch-timeout-ms", "--persist-timeout-ms"] {
            let err = Args::parse_from(["quotation_server", flag, max.as_str()])
                .into_config()
                .unwrap_err();
            assert_eq!(err.kind(), "config", "flag {}", flag);
        }

        let config = Args::parse_from(["quotation_server", "--request-budget-ms", "60000"])
            .into_config()
            .unwrap();
        assert_eq!(config.deadlines.request_ceiling, MAX_BUDGET);
    }

    #[test]
    fn bad_bind_address_is_a_config_error() {
        let err = Args::parse_from(["quotation_server", "--bind", "localhost"])
            .into_config()
            .unwrap_err();
        assert_eq!(err.kind(), "config");
    }
}
