//! Output filename construction for fetched reports.

use crate::manifest::ReportRow;

/// Replaces filesystem-hostile characters with `_`.
///
/// The replaced set is `\ / * ? : " < > |`. Everything else, including spaces
/// and non-ASCII, passes through unchanged so filenames stay recognizable next
/// to the portal's own labels. One replaced character becomes exactly one
/// underscore.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}

/// Derives the output filename for one manifest row:
/// `{reportname}_{account.name}_{date}_({id}).pdf`, each text field sanitized.
///
/// The id is embedded verbatim, which keeps filenames distinct even when two
/// rows share report name, account, and date.
pub fn output_filename(row: &ReportRow) -> String {
    format!(
        "{}_{}_{}_({}).pdf",
        sanitize(&row.report_name),
        sanitize(&row.account_name),
        sanitize(&row.date),
        row.id
    )
}
