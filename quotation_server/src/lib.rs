//! Local quotation server.
//!
//! Serves `GET /cotacao`. Each request flows through the building blocks below:
//!
//! - `upstream`: `UpstreamClient`, one bounded GET to the quotation provider.
//! - `store`: `SqliteStore`, pooled SQLite insert bounded by its own stage deadline.
//! - `handler`: orchestrates fetch then persist, and maps failures to a 500.
//! - `app`: explicit `Router` value, shared `AppState` and graceful serving.
//! - `config` / `args`: clap arguments turned into a `ServerConfig` and `DeadlinePolicy`.
//!
//! Deadlines: the caller's budget arrives in the `x-request-deadline-ms` header and is
//! clamped to the configured ceiling. The fetch and the insert each receive a share of
//! what is left, capped at their own limits, so the server answers inside the budget.
#![warn(missing_docs)]
pub mod app;
pub mod args;
pub mod config;
pub mod handler;
pub mod model;
pub mod store;
pub mod upstream;
