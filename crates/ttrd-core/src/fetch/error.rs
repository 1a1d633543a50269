//! Per-report fetch error classification.

use thiserror::Error;

/// Why one report could not be saved. Fatal to its row only; the batch moves
/// on to the next row.
#[derive(Debug, Error)]
pub enum FetchError {
    /// curl reported an error (timeout, connection, TLS, ...).
    #[error("request failed: {0}")]
    Transport(#[from] curl::Error),

    /// The portal answered with a non-200 status.
    #[error("HTTP {0}")]
    Status(u32),

    /// A 200 response whose body is not a PDF. Typically an HTML error page
    /// served with a success status; saving it would produce a broken file.
    #[error("response is not a PDF")]
    NotPdf,
}
