//! Shared networking constants and helpers used by client and server.

use std::time::Duration;

/// Port the local quotation server listens on.
pub const SERVER_PORT: u16 = 8080;
/// The single route served by the local server.
pub const QUOTATION_PATH: &str = "/cotacao";
/// Request header carrying the caller's remaining budget in milliseconds.
pub const DEADLINE_HEADER: &str = "x-request-deadline-ms";
/// Base URL of the quotation provider; the currency pair is appended.
pub const UPSTREAM_BASE_URL: &str = "https://economia.awesomeapi.com.br/json/last";

/// Budget of the CLI call to the local server.
pub const CLIENT_TIMEOUT: Duration = Duration::from_millis(300);
/// Upper bound for the upstream fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_millis(200);
/// Upper bound for the datastore insert.
pub const PERSIST_TIMEOUT: Duration = Duration::from_millis(10);
/// Budget the server grants a request that carries no deadline header.
pub const REQUEST_CEILING: Duration = Duration::from_millis(250);
/// Largest budget any configured deadline may have.
pub const MAX_BUDGET: Duration = Duration::from_secs(60);

/// Helper to format an IPv4 address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// URL of the quotation route on a server reachable at `host:port`.
pub fn quotation_url(host: &str, port: u16) -> String {
    format!("http://{}{}", addr(host, port), QUOTATION_PATH)
}
