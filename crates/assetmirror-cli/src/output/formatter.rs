//! Output formatter trait for CLI results.

use anyhow::Result;
use assetmirror_core::AssetManifest;
use assetmirror_core::ExtractionReport;
use serde::Serialize;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format extraction result
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()>;

    /// Format asset listing (paths only)
    fn format_manifest_short(&self, manifest: &AssetManifest) -> Result<()>;

    /// Format asset listing with entry kinds and totals
    fn format_manifest_long(&self, manifest: &AssetManifest) -> Result<()>;
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    /// Completed, but some nodes failed
    Partial,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn new(operation: impl Into<String>, status: Status, data: T) -> Self {
        Self {
            operation: operation.into(),
            status,
            data: Some(data),
        }
    }

    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self::new(operation, Status::Success, data)
    }
}
