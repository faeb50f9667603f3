//! Row written to the `quotations` table.

use chrono::{DateTime, Utc};

/// One persisted quotation. Written once, never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedRecord {
    /// Autoincrement row id.
    pub id: i64,
    /// Provider display name of the pair.
    pub name: String,
    /// Bid at fetch time.
    pub value: f64,
    /// Wall-clock insertion time.
    pub date_created: DateTime<Utc>,
}
