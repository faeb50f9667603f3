//! Quotation data model and decoding of the provider payload.
//!
//! The provider answers with an object keyed by the pair code (e.g. `USDBRL`) whose
//! value holds every field as a string. A `Quotation` only exists after the whole
//! object decoded and its `bid` parsed as a number.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::currency::CurrencyPair;
use crate::error::QuotationError;
use crate::result::Result;

/// Snapshot of an exchange rate as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    /// Base currency code, e.g. `USD`.
    pub code: String,
    /// Counter currency code, e.g. `BRL`.
    pub codein: String,
    /// Display name, e.g. `Dólar Americano/Real Brasileiro`.
    pub name: String,
    /// Session high.
    pub high: String,
    /// Session low.
    pub low: String,
    /// Absolute bid variation.
    #[serde(rename = "varBid")]
    pub var_bid: String,
    /// Bid variation in percent.
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    /// Price a buyer offers; the value surfaced by the server.
    pub bid: String,
    /// Price a seller asks.
    pub ask: String,
    /// Provider timestamp in seconds since the UNIX epoch, as text.
    pub timestamp: String,
    /// Human-readable creation date, e.g. `2024-05-10 17:59:58`.
    pub create_date: String,
}

impl Quotation {
    /// Decode a provider response body for `pair`.
    ///
    /// Fails with [`QuotationError::Decode`] when the body is not JSON, the pair key is
    /// missing, any field is absent or not a string, or the bid is not a finite number.
    pub fn from_payload(body: &[u8], pair: CurrencyPair) -> Result<Quotation> {
        let key = pair.response_key();
        let mut envelope: serde_json::Map<String, Value> = serde_json::from_slice(body)?;
        let inner = envelope
            .remove(&key)
            .ok_or_else(|| QuotationError::Decode(format!("missing key {}", key)))?;
        let quotation: Quotation = serde_json::from_value(inner)?;
        quotation.bid_value()?;
        Ok(quotation)
    }

    /// The bid as a number, for storage.
    pub fn bid_value(&self) -> Result<f64> {
        match self.bid.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(QuotationError::Decode(format!(
                "bid is not a decimal number: {:?}",
                self.bid
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.1207","low":"5.0961","varBid":"0.0051","pctChange":"0.1","bid":"5.1132","ask":"5.1142","timestamp":"1715374798","create_date":"2024-05-10 17:59:58"}}"#;

    #[test]
    fn decodes_provider_payload() {
        let quotation = Quotation::from_payload(PAYLOAD.as_bytes(), CurrencyPair::UsdBrl).unwrap();
        assert_eq!(quotation.code, "USD");
        assert_eq!(quotation.var_bid, "0.0051");
        assert_eq!(quotation.pct_change, "0.1");
        assert_eq!(quotation.bid, "5.1132");
        assert_eq!(quotation.create_date, "2024-05-10 17:59:58");
        assert!((quotation.bid_value().unwrap() - 5.1132).abs() < 1e-9);
    }

    #[test]
    fn wrong_pair_key_is_a_decode_error() {
        let err = Quotation::from_payload(PAYLOAD.as_bytes(), CurrencyPair::EurBrl).unwrap_err();
        assert!(matches!(err, QuotationError::Decode(msg) if msg.contains("EURBRL")));
    }

    #[test]
    fn partial_object_is_rejected() {
        let body = r#"{"USDBRL":{"code":"USD","bid":"5.00"}}"#;
        let err = Quotation::from_payload(body.as_bytes(), CurrencyPair::UsdBrl).unwrap_err();
        assert_eq!(err.kind(), "decode");
    }

    #[test]
    fn non_numeric_bid_is_rejected() {
        let body = PAYLOAD.replace("5.1132", "n/a");
        let err = Quotation::from_payload(body.as_bytes(), CurrencyPair::UsdBrl).unwrap_err();
        assert_eq!(err.kind(), "decode");
    }

    #[test]
    fn garbage_body_is_rejected() {
        let err = Quotation::from_payload(b"<html>busy</html>", CurrencyPair::UsdBrl).unwrap_err();
        assert_eq!(err.kind(), "decode");
    }
}
