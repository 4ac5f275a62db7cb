//! Helper utilities shared across export backends.

use crate::{Result, error::ExportError};
use std::path::Path;

/// Counts the data rows in a CSV export, excluding the header.
///
/// The export is parsed as CSV rather than counted by line so quoted
/// fields containing embedded newlines are attributed to a single row.
pub fn count_csv_rows(data: &[u8]) -> Result<u64> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let mut rows: u64 = 0;
    for record in reader.byte_records() {
        record.map_err(|e| ExportError::csv("failed to parse exported CSV", e))?;
        rows += 1;
    }
    Ok(rows)
}

/// Builds the ODBC connection descriptor for an Access database file.
///
/// The caller is expected to pass an absolute path; the Access driver
/// resolves DBQ relative to its own working directory otherwise.
pub fn access_connection_string(database: &Path) -> String {
    format!(
        "DRIVER={{Microsoft Access Driver (*.mdb, *.accdb)}};DBQ={};",
        database.display()
    )
}
