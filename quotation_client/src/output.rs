//! Append-only quotation file.
//!
//! Each write is `Dólar: <body>` with no trailing separator, so successive runs
//! concatenate on one line. Readers of the file rely on this layout.
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use quotation_common::Result;

/// Label written before every body.
pub const LABEL: &str = "Dólar: ";

/// Append `body` to the file at `path`, creating it if absent.
pub fn append_quotation(path: &Path, body: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(format!("{}{}", LABEL, body).as_bytes())?;
    Ok(())
}
