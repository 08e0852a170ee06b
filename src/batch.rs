//! Sequential walk over a deck manifest

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use serde::Serialize;

use crate::deck::ManifestEntry;
use crate::fetch::{FetchOutcome, Fetcher};

/// A card that could not be fetched under any candidate name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub source: String,
    pub destination: PathBuf,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: Vec<FailureRecord>,
}

impl BatchReport {
    /// Closing block printed after the run
    pub fn summary(&self) -> String {
        let mut out = String::from("\n=== DONE ===\n");
        if self.failed.is_empty() {
            out.push_str("ALL OK\n");
        } else {
            let _ = writeln!(out, "FAILED: {}", self.failed.len());
            for record in &self.failed {
                let _ = writeln!(
                    out,
                    "- {} => {}  ({})",
                    record.source,
                    record.destination.display(),
                    record.error
                );
            }
        }
        out
    }

    /// Persist the report as pretty JSON
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            io::Error::new(
                io::ErrorKind::Other,
                format!("Failed to serialize report: {}", e),
            )
        })?;
        std::fs::write(path, json)
    }
}

/// Fetch every entry into `output_dir`, one at a time.
///
/// Failures are recorded and never stop the batch.
pub async fn run(fetcher: &Fetcher, entries: &[ManifestEntry], output_dir: &Path) -> BatchReport {
    let mut report = BatchReport::default();

    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    for entry in entries {
        let dest = output_dir.join(&entry.output);
        let candidates = entry.candidates();
        pb.set_message(entry.output.clone());
        debug!(
            "{} {} ({}): {} candidates",
            entry.category,
            entry.rank,
            entry.source,
            candidates.len()
        );

        match fetcher.fetch_any(&candidates, &dest).await {
            Ok(fetched) => {
                match fetched.outcome {
                    FetchOutcome::Downloaded { bytes } => {
                        debug!("wrote {} bytes to {}", bytes, dest.display());
                        report.downloaded += 1;
                    }
                    FetchOutcome::Skipped => report.skipped += 1,
                }
                pb.suspend(|| {
                    println!(
                        "DL: {} ({}) -> {}",
                        entry.label(),
                        entry.used_note(&fetched.used),
                        dest.display()
                    )
                });
            }
            Err(e) => {
                pb.suspend(|| println!("NG: {} -> {} ({})", entry.label(), dest.display(), e));
                report.failed.push(FailureRecord {
                    source: entry.label().to_string(),
                    destination: dest,
                    error: e.to_string(),
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();
    report
}
