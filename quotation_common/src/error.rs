//! Error types shared between client and server.
//!
//! The `QuotationError` enum mirrors the failure taxonomy of the quotation chain:
//! deadlines, malformed upstream payloads, storage, transport and status failures.
//! Each crate propagates this single error type with `?`.
use std::io;

use strum::Display;
use thiserror::Error;

/// The blocking step a deadline was attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Stage {
    /// Whole client request to the local server.
    #[strum(serialize = "request")]
    Request,
    /// Outbound call to the quotation provider.
    #[strum(serialize = "upstream fetch")]
    Fetch,
    /// Insert into the local datastore.
    #[strum(serialize = "persistence")]
    Persist,
}

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum QuotationError {
    /// The operation did not complete before its deadline.
    #[error("Deadline exceeded during {0}")]
    DeadlineExceeded(Stage),

    /// Upstream payload was not valid JSON or did not match the quotation shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Datastore open, pool checkout or statement failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Connection-level HTTP failure.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Peer answered with a non-success HTTP status.
    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(u16),

    /// I/O error originating from sockets or files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration value (addresses, URLs, header values).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuotationError {
    /// Short, stable label used when logging the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            QuotationError::DeadlineExceeded(_) => "deadline_exceeded",
            QuotationError::Decode(_) => "decode",
            QuotationError::Storage(_) => "storage",
            QuotationError::Transport(_) => "transport",
            QuotationError::UnexpectedStatus(_) => "unexpected_status",
            QuotationError::Io(_) => "io",
            QuotationError::Config(_) => "config",
        }
    }

    /// Returns `true` for deadline expiry at any stage.
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, QuotationError::DeadlineExceeded(_))
    }
}

impl From<serde_json::Error> for QuotationError {
    fn from(err: serde_json::Error) -> Self {
        QuotationError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_become_decode_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = QuotationError::from(err);
        assert_eq!(err.kind(), "decode");
        assert!(!err.is_deadline_exceeded());
    }

    #[test]
    fn deadline_message_names_the_stage() {
        let err = QuotationError::DeadlineExceeded(Stage::Persist);
        assert!(err.is_deadline_exceeded());
        assert_eq!(err.to_string(), "Deadline exceeded during persistence");
    }
}
