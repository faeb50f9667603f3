//! Currency pairs supported by the quotation provider.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Pair of currencies requested from the provider, e.g. `USD-BRL`.
///
/// The `Display` form is the path segment of the provider URL. The provider keys
/// its response object by the same codes without the dash (`USDBRL`).
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
)]
#[strum(ascii_case_insensitive)]
pub enum CurrencyPair {
    /// US dollar priced in Brazilian real.
    #[default]
    #[strum(serialize = "USD-BRL")]
    #[value(name = "USD-BRL")]
    UsdBrl,
    /// Euro priced in Brazilian real.
    #[strum(serialize = "EUR-BRL")]
    #[value(name = "EUR-BRL")]
    EurBrl,
    /// British pound priced in Brazilian real.
    #[strum(serialize = "GBP-BRL")]
    #[value(name = "GBP-BRL")]
    GbpBrl,
    /// Bitcoin priced in Brazilian real.
    #[strum(serialize = "BTC-BRL")]
    #[value(name = "BTC-BRL")]
    BtcBrl,
}

impl CurrencyPair {
    /// Key under which the provider nests the quotation object.
    pub fn response_key(&self) -> String {
        self.to_string().replace('-', "")
    }

    /// Build the provider URL for this pair below `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self)
    }
}
