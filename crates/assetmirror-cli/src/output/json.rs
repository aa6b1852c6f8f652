//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::Status;
use anyhow::Result;
use assetmirror_core::AssetManifest;
use assetmirror_core::ExtractionReport;
use assetmirror_core::NodeKind;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

#[derive(Serialize)]
struct ExtractionOutput {
    files_copied: usize,
    files_skipped: usize,
    directories_created: usize,
    leaves_unreadable: usize,
    nodes_failed: usize,
    bytes_written: u64,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl From<&ExtractionReport> for ExtractionOutput {
    fn from(report: &ExtractionReport) -> Self {
        Self {
            files_copied: report.files_copied,
            files_skipped: report.files_skipped,
            directories_created: report.directories_created,
            leaves_unreadable: report.leaves_unreadable,
            nodes_failed: report.nodes_failed,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

#[derive(Serialize)]
struct EntryOutput {
    path: String,
    /// `null` when the source cannot tell files from empty directories
    kind: Option<&'static str>,
}

#[derive(Serialize)]
struct ManifestOutput {
    total_entries: usize,
    total_files: usize,
    total_directories: usize,
    nodes_failed: usize,
    entries: Vec<EntryOutput>,
}

impl ManifestOutput {
    fn new(manifest: &AssetManifest) -> Self {
        let entries = manifest
            .entries
            .iter()
            .map(|entry| EntryOutput {
                path: entry.path.to_string(),
                kind: entry.kind.map(|kind| match kind {
                    NodeKind::File => "file",
                    NodeKind::Directory => "directory",
                }),
            })
            .collect();

        Self {
            total_entries: manifest.total_entries(),
            total_files: manifest.total_files(),
            total_directories: manifest.total_directories(),
            nodes_failed: manifest.nodes_failed,
            entries,
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        let status = if report.is_clean() {
            Status::Success
        } else {
            Status::Partial
        };
        Self::output(&JsonOutput::new(
            "extract",
            status,
            ExtractionOutput::from(report),
        ))
    }

    fn format_manifest_short(&self, manifest: &AssetManifest) -> Result<()> {
        Self::output(&JsonOutput::success(
            "list",
            ManifestOutput::new(manifest),
        ))
    }

    // JSON always carries the entry kinds.
    fn format_manifest_long(&self, manifest: &AssetManifest) -> Result<()> {
        self.format_manifest_short(manifest)
    }
}
