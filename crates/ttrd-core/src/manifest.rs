//! CSV report manifest: the list of reports to fetch.
//!
//! The manifest is a CSV file with one row per report. Four columns are
//! required; anything else is ignored. Row order is the fetch order.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Columns every manifest must carry. Matching is exact, including the dot in
/// `account.name`.
pub const REQUIRED_COLUMNS: [&str; 4] = ["id", "reportname", "account.name", "date"];

/// One report to fetch, as described by a manifest row. All fields are free
/// text supplied by whoever exported the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRow {
    /// Report identifier, appended to the report base URL verbatim.
    pub id: String,
    #[serde(rename = "reportname")]
    pub report_name: String,
    #[serde(rename = "account.name")]
    pub account_name: String,
    pub date: String,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse manifest: {0}")]
    Csv(#[from] csv::Error),

    #[error("manifest is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Reads and validates the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<Vec<ReportRow>, ManifestError> {
    let file = File::open(path)?;
    read_manifest(file)
}

/// Reads manifest rows from any CSV source.
///
/// The header is checked against [`REQUIRED_COLUMNS`] before any row is
/// deserialized, so a manifest missing a column fails as a whole instead of at
/// the first affected row. A row with the wrong field count is also fatal.
pub fn read_manifest<R: Read>(reader: R) -> Result<Vec<ReportRow>, ManifestError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ManifestError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    for row in csv_reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
