//! Error conversion utilities for CLI.
//!
//! Converts assetmirror-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use assetmirror_core::ExtractionError;
use std::path::Path;

/// Converts `ExtractionError` to user-friendly anyhow error with context
pub fn convert_extraction_error(err: ExtractionError, source: &Path) -> anyhow::Error {
    match err {
        ExtractionError::DestinationUnavailable { reason } => {
            anyhow!(
                "Destination directory unavailable: {reason}\n\
                 HINT: The output directory must already exist and be writable."
            )
        }
        ExtractionError::ListFailed { path, source: io_err } => {
            let path = if path.is_empty() { "/" } else { path.as_str() };
            anyhow!(
                "Cannot list assets at '{}' in '{}': {}\n\
                 HINT: Check --prefix and --subtree; nothing was extracted.",
                path,
                source.display(),
                io_err
            )
        }
        ExtractionError::InvalidAssetPath { path, reason } => {
            anyhow!(
                "Invalid asset path '{path}': {reason}\n\
                 HINT: Asset paths are relative and slash-separated, without '.' or '..'."
            )
        }
        ExtractionError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                source.display(),
                io_err
            )
        }
        ExtractionError::UnsupportedFormat => {
            anyhow!(
                "Asset source format not supported: {}\n\
                 HINT: Supported sources: directory, zip, apk, jar, aar, tar, tar.gz",
                source.display()
            )
        }
        ExtractionError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid package '{}': {}\n\
                 HINT: The package may be corrupted or truncated.",
                source.display(),
                reason
            )
        }
    }
}

/// Adds context to a core result about the asset source being processed
pub fn add_source_context<T>(
    result: Result<T, ExtractionError>,
    source: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, source))
}
