//! Deadlines propagated from the outermost caller inward.
//!
//! A [`Deadline`] is an absolute instant on the monotonic clock. The CLI creates one,
//! sends the remaining budget to the server in [`crate::net::DEADLINE_HEADER`], and the
//! server derives a stage deadline for every blocking step with [`Deadline::stage`].
//! A stage deadline is never later than its parent, so the stages of a request can
//! not add up to more than the budget the caller granted.

use std::time::{Duration, Instant};

use crate::error::QuotationError;
use crate::net::MAX_BUDGET;
use crate::result::Result;

/// Share of the remaining budget granted to the upstream fetch.
pub const FETCH_SHARE: f64 = 0.8;
/// Share of the remaining budget granted to the datastore insert.
pub const PERSIST_SHARE: f64 = 0.8;

/// Absolute point in time after which an operation is aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Deadline `budget` from now.
    ///
    /// A budget the clock can not represent is clamped to [`MAX_BUDGET`].
    pub fn after(budget: Duration) -> Self {
        let now = Instant::now();
        Self {
            at: now.checked_add(budget).unwrap_or(now + MAX_BUDGET),
        }
    }

    /// Deadline at an explicit instant.
    pub fn at(at: Instant) -> Self {
        Self { at }
    }

    /// The instant this deadline expires.
    pub fn instant(&self) -> Instant {
        self.at
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// Returns `true` once the deadline has passed.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Derive a deadline for one stage of the work bounded by `self`.
    ///
    /// The stage gets `share` of the remaining budget, capped at `cap`:
    /// `now + min(cap, remaining * share)`. A `share` outside `0.0..=1.0` is clamped.
    pub fn stage(&self, cap: Duration, share: f64) -> Deadline {
        let share = share.clamp(0.0, 1.0);
        let slice = self.remaining().mul_f64(share).min(cap);
        Deadline::after(slice).min(*self)
    }

    /// Remaining budget in whole milliseconds, as sent in the deadline header.
    pub fn header_value(&self) -> String {
        self.remaining().as_millis().to_string()
    }

    /// Parse a budget received in the deadline header, bounded by `ceiling`.
    ///
    /// The budget starts counting on receipt. Values larger than `ceiling` are
    /// clamped to it.
    pub fn from_header_value(value: &str, ceiling: Duration) -> Result<Deadline> {
        let millis: u64 = value.trim().parse().map_err(|e| {
            QuotationError::Config(format!("invalid deadline header {:?}: {}", value, e))
        })?;
        Ok(Deadline::after(Duration::from_millis(millis).min(ceiling)))
    }
}
