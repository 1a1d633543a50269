//! `ttrd run <manifest>` – the full pipeline: log in, fetch every report,
//! write the PDFs and the zip bundle.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ttrd_core::auth::{login, Login, LoginOutcome, LogoutMarker};
use ttrd_core::config::TtrdConfig;
use ttrd_core::fetch::{fetch_all, report_base_url, BatchResult};
use ttrd_core::manifest::load_manifest;

use crate::prompt;

pub fn run_pipeline(cfg: &TtrdConfig, manifest_path: &Path, output_dir: &Path) -> Result<()> {
    // Validate the manifest before asking for credentials. A bad file must
    // fail without touching the keyboard or the network.
    let rows = load_manifest(manifest_path)
        .with_context(|| format!("load manifest {}", manifest_path.display()))?;
    println!(
        "Loaded {} report(s) from {}",
        rows.len(),
        manifest_path.display()
    );
    if rows.is_empty() {
        println!("Manifest has no rows; nothing to fetch.");
        return Ok(());
    }

    let creds = prompt::read_credentials()?;

    let Login {
        mut session,
        outcome,
    } = login(
        &creds.base_url,
        &creds.username,
        &creds.password,
        cfg.login_timeout(),
        &LogoutMarker,
    )
    .context("login")?;
    match outcome {
        LoginOutcome::Verified => println!("Login successful."),
        _ => println!("Login sent, but not confirmed; the per-report results below will tell."),
    }

    let base = report_base_url(&creds.base_url).context("derive report URL")?;
    let batch = fetch_all(&mut session, &rows, &base, cfg.report_timeout())?;

    for outcome in &batch.outcomes {
        match &outcome.result {
            Ok(saved) => println!("Downloaded: {}", saved.filename),
            Err(err) => println!("Failed report {}: {}", outcome.id, err),
        }
    }

    let archive_path = write_outputs(&batch, output_dir, &cfg.archive_name)?;
    println!(
        "Done: {} of {} reports downloaded. Bundle: {}",
        batch.saved_count(),
        batch.outcomes.len(),
        archive_path.display()
    );
    Ok(())
}

/// Writes each saved PDF and the zip bundle under `output_dir`. Returns the
/// bundle path.
fn write_outputs(batch: &BatchResult, output_dir: &Path, archive_name: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir {}", output_dir.display()))?;

    for saved in batch.saved() {
        let path = output_dir.join(&saved.filename);
        fs::write(&path, &saved.bytes).with_context(|| format!("write {}", path.display()))?;
    }

    let archive_path = output_dir.join(archive_name);
    fs::write(&archive_path, &batch.archive)
        .with_context(|| format!("write {}", archive_path.display()))?;
    Ok(archive_path)
}
