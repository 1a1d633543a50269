//! Sequential report retrieval.
//!
//! Walks the manifest rows in order with one request in flight, validating
//! each response before it is saved. A failing row is recorded and logged but
//! never stops the batch; only archive finalization can fail the whole run.

mod error;
mod filename;

pub use error::FetchError;
pub use filename::{output_filename, sanitize};

use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

use crate::archive::ReportArchive;
use crate::manifest::ReportRow;
use crate::session::Session;

/// Printable-report path under the portal base. Report URLs are formed by
/// appending the row id directly to this, so the trailing slash matters.
const REPORT_PATH: &str = "/patrol/default/viewreportprintable/idreport/";

/// Leading bytes of every well-formed PDF.
const PDF_MAGIC: &[u8] = b"%PDF";

/// A fetched report ready to write out: derived filename plus PDF bytes.
#[derive(Debug, Clone)]
pub struct SavedReport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Outcome of one manifest row.
#[derive(Debug)]
pub struct FetchOutcome {
    pub id: String,
    pub result: Result<SavedReport, FetchError>,
}

/// Everything a batch produced: the finished zip plus per-row outcomes, in
/// row order.
#[derive(Debug)]
pub struct BatchResult {
    pub archive: Vec<u8>,
    pub outcomes: Vec<FetchOutcome>,
}

impl BatchResult {
    pub fn saved(&self) -> impl Iterator<Item = &SavedReport> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn saved_count(&self) -> usize {
        self.saved().count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.saved_count()
    }
}

/// Resolves the printable-report base URL for a portal.
pub fn report_base_url(base_url: &str) -> Result<String, url::ParseError> {
    let base = Url::parse(base_url)?;
    Ok(base.join(REPORT_PATH)?.into())
}

/// Fetches every row's PDF through `session`, sequentially in row order.
///
/// Successes land in the archive under their derived filename and in the
/// returned outcomes; failures are recorded with their row id and cause. The
/// session is reused as-is for every request, cookies included.
pub fn fetch_all(
    session: &mut Session,
    rows: &[ReportRow],
    report_base_url: &str,
    timeout: Duration,
) -> Result<BatchResult> {
    let mut archive = ReportArchive::new();
    let mut outcomes = Vec::with_capacity(rows.len());

    for row in rows {
        let result = fetch_one(session, row, report_base_url, timeout);
        match &result {
            Ok(saved) => {
                tracing::info!("report {} saved as {}", row.id, saved.filename);
                archive
                    .add(&saved.filename, &saved.bytes)
                    .with_context(|| format!("archive report {}", row.id))?;
            }
            Err(err) => tracing::warn!("report {} failed: {}", row.id, err),
        }
        outcomes.push(FetchOutcome {
            id: row.id.clone(),
            result,
        });
    }

    let archive = archive.finish().context("finalize report archive")?;
    Ok(BatchResult { archive, outcomes })
}

/// One row: GET, status check, PDF signature check.
///
/// The URL is plain concatenation of the report base and the id, matching how
/// the portal links printable reports.
fn fetch_one(
    session: &mut Session,
    row: &ReportRow,
    report_base_url: &str,
    timeout: Duration,
) -> Result<SavedReport, FetchError> {
    let url = format!("{}{}", report_base_url, row.id);
    let response = session.get(&url, timeout)?;

    if response.status != 200 {
        return Err(FetchError::Status(response.status));
    }
    if !response.body.starts_with(PDF_MAGIC) {
        return Err(FetchError::NotPdf);
    }

    Ok(SavedReport {
        filename: output_filename(row),
        bytes: response.body,
    })
}
