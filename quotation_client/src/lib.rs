//! Quotation client library.
//!
//! - `args`: clap arguments with defaults for URL, timeout and output file.
//! - `requester`: `QuotationRequester`, one bounded GET that propagates its deadline.
//! - `output`: append-only `cotacao.txt` writer.
#![warn(missing_docs)]
pub mod args;
pub mod output;
pub mod requester;
