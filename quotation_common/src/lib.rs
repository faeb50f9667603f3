//!
//! Common types and utilities shared by the quotation server and client.
//!
//! This crate aggregates:
//! - `error`: unified error type `QuotationError` used across the workspace.
//! - `result`: handy `Result<T, QuotationError>` alias.
//! - `currency`: currency pairs understood by the quotation provider.
//! - `quotation`: the `Quotation` model and provider payload decoding.
//! - `deadline`: deadlines propagated from the CLI down to storage.
//! - `net`: networking constants and small helpers.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod currency;
pub mod quotation;
pub mod deadline;
pub mod net;

pub use error::{QuotationError, Stage};
pub use result::Result;
pub use quotation::Quotation;
pub use deadline::Deadline;
