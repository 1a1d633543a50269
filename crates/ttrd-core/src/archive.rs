//! In-memory zip packaging of fetched reports.

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Zip archive of report PDFs, built up in memory one entry at a time.
///
/// `finish` consumes the value: once the central directory is written the
/// archive cannot be appended to, and the type makes that unrepresentable.
pub struct ReportArchive {
    writer: ZipWriter<Cursor<Vec<u8>>>,
}

impl ReportArchive {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds one file entry with the given contents.
    pub fn add(&mut self, filename: &str, bytes: &[u8]) -> Result<()> {
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.writer
            .start_file(filename, options)
            .with_context(|| format!("start archive entry {}", filename))?;
        self.writer
            .write_all(bytes)
            .with_context(|| format!("write archive entry {}", filename))?;
        Ok(())
    }

    /// Writes the central directory and returns the complete archive bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.writer.finish().context("finalize archive")?;
        Ok(cursor.into_inner())
    }
}

impl Default for ReportArchive {
    fn default() -> Self {
        Self::new()
    }
}
