//! Domain models owned by the quotation server.
//!
//! - `record`: `PersistedRecord`, one row of the `quotations` table.

pub mod record;
