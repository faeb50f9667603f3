//! Outbound client for the quotation provider.
//!
//! One GET per call, bounded by a stage deadline. When the deadline fires the request
//! future is dropped, which closes the connection. Nothing is retried.

use log::{debug, warn};
use quotation_common::currency::CurrencyPair;
use quotation_common::{Deadline, Quotation, QuotationError, Result, Stage};
use reqwest::Client;
use tokio::time::{Instant, timeout_at};

/// HTTP client bound to one provider URL and currency pair.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    url: String,
    pair: CurrencyPair,
}

impl UpstreamClient {
    /// Create a client for `pair` below the provider `base_url`.
    pub fn new(base_url: &str, pair: CurrencyPair) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("quotation_server/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            url: pair.url(base_url),
            pair,
        })
    }

    /// Full URL requested on every fetch.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and decode one quotation before `deadline`.
    pub async fn fetch(&self, deadline: Deadline) -> Result<Quotation> {
        if deadline.is_expired() {
            warn!("No budget left to call {}", self.url);
            return Err(QuotationError::DeadlineExceeded(Stage::Fetch));
        }
        debug!("GET {} (budget {:?})", self.url, deadline.remaining());

        let request = async {
            let response = self.http.get(&self.url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(QuotationError::UnexpectedStatus(status.as_u16()));
            }
            let body = response.bytes().await?;
            Quotation::from_payload(&body, self.pair)
        };

        match timeout_at(Instant::from_std(deadline.instant()), request).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Timeout exceeded for call to {}", self.url);
                Err(QuotationError::DeadlineExceeded(Stage::Fetch))
            }
        }
    }
}
