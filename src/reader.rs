// 📂 Registry file reader - CSV rows keyed by column name

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// RawRow - one line of the registry file, untouched
///
/// Every column is required in the header; values may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "ISIN")]
    pub isin: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "EPS")]
    pub eps: String,

    #[serde(rename = "Months in Report")]
    pub months_in_report: String,

    #[serde(rename = "Report Expiry Date")]
    pub report_expiry_date: String,

    #[serde(rename = "Own Investor Link")]
    pub own_investor_link: String,

    #[serde(rename = "Stock Exchange Link")]
    pub stock_exchange_link: String,
}

/// Read every row of the registry file at `path`
pub fn read_rows(path: &Path, delimiter: u8) -> Result<Vec<RawRow>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open registry file: {:?}", path))?;

    read_rows_from_reader(file, delimiter)
        .with_context(|| format!("Failed to read registry file: {:?}", path))
}

/// Read registry rows from any source (file, in-memory buffer, ...)
pub fn read_rows_from_reader<R: Read>(source: R, delimiter: u8) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(source);

    let mut rows = Vec::new();

    for (idx, result) in rdr.deserialize().enumerate() {
        // +2: 1-based and the header line
        let row: RawRow =
            result.with_context(|| format!("Failed to deserialize registry row {}", idx + 2))?;
        rows.push(row);
    }

    Ok(rows)
}

// ============================================================================
// TESTS
// ============================================================================
