//! Server configuration and the deadline policy applied to each request.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use log::warn;
use quotation_common::Deadline;
use quotation_common::currency::CurrencyPair;
use quotation_common::deadline::{FETCH_SHARE, PERSIST_SHARE};
use quotation_common::net::{
    FETCH_TIMEOUT, PERSIST_TIMEOUT, REQUEST_CEILING, SERVER_PORT, UPSTREAM_BASE_URL, addr,
};

/// How a request budget is obtained and split across the blocking stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlinePolicy {
    /// Largest budget granted to one request, also used when the caller sends none.
    pub request_ceiling: Duration,
    /// Upper bound of the upstream fetch.
    pub fetch_cap: Duration,
    /// Upper bound of the datastore insert.
    pub persist_cap: Duration,
}

impl Default for DeadlinePolicy {
    fn default() -> Self {
        Self {
            request_ceiling: REQUEST_CEILING,
            fetch_cap: FETCH_TIMEOUT,
            persist_cap: PERSIST_TIMEOUT,
        }
    }
}

impl DeadlinePolicy {
    /// Request deadline from the caller's deadline header, if any.
    pub fn inbound(&self, header: Option<&str>) -> Deadline {
        match header.map(|value| Deadline::from_header_value(value, self.request_ceiling)) {
            Some(Ok(deadline)) => deadline,
            Some(Err(e)) => {
                warn!("Ignoring caller deadline: {}", e);
                Deadline::after(self.request_ceiling)
            }
            None => Deadline::after(self.request_ceiling),
        }
    }

    /// Stage deadline for the upstream fetch.
    pub fn fetch(&self, request: &Deadline) -> Deadline {
        request.stage(self.fetch_cap, FETCH_SHARE)
    }

    /// Stage deadline for the datastore insert, derived after the fetch returned.
    pub fn persist(&self, request: &Deadline) -> Deadline {
        request.stage(self.persist_cap, PERSIST_SHARE)
    }
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address of the HTTP server.
    pub bind_addr: SocketAddr,
    /// Provider base URL; the pair is appended.
    pub upstream_base_url: String,
    /// Pair requested from the provider.
    pub pair: CurrencyPair,
    /// SQLite database file.
    pub database: PathBuf,
    /// Number of pooled datastore connections.
    pub pool_size: u32,
    /// Request budget and stage caps.
    pub deadlines: DeadlinePolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], SERVER_PORT)),
            upstream_base_url: UPSTREAM_BASE_URL.to_string(),
            pair: CurrencyPair::default(),
            database: PathBuf::from("quotation.db"),
            pool_size: 4,
            deadlines: DeadlinePolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Human-readable listen address, e.g. `0.0.0.0:8080`.
    pub fn listen_addr(&self) -> String {
        addr(&self.bind_addr.ip().to_string(), self.bind_addr.port())
    }
}
