//! Single bounded request to the local quotation server.
//!
//! The requester owns the outermost deadline of the chain. Its remaining budget travels
//! to the server in the deadline header, so the server can fit its own stages inside it.
use std::time::Duration;

use log::debug;
use quotation_common::net::DEADLINE_HEADER;
use quotation_common::{Deadline, QuotationError, Result, Stage};
use reqwest::Client;
use tokio::time::{Instant, timeout_at};

/// Client for the quotation route.
#[derive(Debug, Clone)]
pub struct QuotationRequester {
    http: Client,
    url: String,
    timeout: Duration,
}

impl QuotationRequester {
    /// Create a requester for `url` that gives every call `timeout`.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            url: url.to_string(),
            timeout,
        })
    }

    /// Target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the quotation and return the raw response body.
    ///
    /// Fails with `DeadlineExceeded(Request)` when no complete answer arrives within the
    /// timeout, and with `UnexpectedStatus` on a non-success status.
    pub async fn request(&self) -> Result<String> {
        let deadline = Deadline::after(self.timeout);

        let call = async {
            let response = self
                .http
                .get(&self.url)
                .header(DEADLINE_HEADER, deadline.header_value())
                .send()
                .await?;
            let status = response.status();
            if !status.is_success() {
                return Err(QuotationError::UnexpectedStatus(status.as_u16()));
            }
            Ok::<_, QuotationError>(response.text().await?)
        };

        match timeout_at(Instant::from_std(deadline.instant()), call).await {
            Ok(result) => {
                debug!("Server answered with {:?} left", deadline.remaining());
                result
            }
            Err(_) => {
                debug!("No answer from {} within {:?}", self.url, self.timeout);
                Err(QuotationError::DeadlineExceeded(Stage::Request))
            }
        }
    }
}
