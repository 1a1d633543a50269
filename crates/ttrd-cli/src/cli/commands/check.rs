//! `ttrd check <manifest>` – offline manifest validation.

use std::path::Path;

use anyhow::{Context, Result};
use ttrd_core::fetch::output_filename;
use ttrd_core::manifest::load_manifest;

/// Parse and validate the manifest, printing the filename each row would
/// produce. No network, no credentials.
pub fn run_check(manifest_path: &Path) -> Result<()> {
    let rows = load_manifest(manifest_path)
        .with_context(|| format!("load manifest {}", manifest_path.display()))?;

    for row in &rows {
        println!("{:<10} {}", row.id, output_filename(row));
    }
    println!("{} row(s), all required columns present.", rows.len());
    Ok(())
}
