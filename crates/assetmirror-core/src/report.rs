//! Extraction reporting and progress callbacks.

use std::time::Duration;

use crate::AssetPath;

/// Report of a single extraction.
///
/// The counters are per event, not per node. Directories that already
/// existed, and empty directories skipped under
/// [`EmptyDirPolicy::Skip`](crate::EmptyDirPolicy::Skip), are not counted at
/// all. A directory that cannot be created counts as one failed node, and
/// each of its descendants then fails and is counted again.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Files copied to the destination.
    pub files_copied: usize,

    /// Files left alone because they already existed and `force` was off.
    pub files_skipped: usize,

    /// Directories created at the destination.
    pub directories_created: usize,

    /// Leaves that could not be opened for reading and were treated as
    /// directories without children.
    pub leaves_unreadable: usize,

    /// Nodes that failed (listing, invalid name, destination write).
    pub nodes_failed: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the extraction.
    pub duration: Duration,

    /// Human-readable descriptions of non-fatal problems.
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns the number of destination entries written by this run.
    #[must_use]
    pub fn total_written(&self) -> usize {
        self.files_copied + self.directories_created
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns `true` if no node failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.nodes_failed == 0
    }
}

/// Callback trait for progress reporting during extraction.
///
/// The total number of nodes is unknown up front (the namespace is walked
/// lazily), so callbacks receive a running count instead.
///
/// # Examples
///
/// ```
/// use assetmirror_core::AssetPath;
/// use assetmirror_core::ProgressCallback;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_entry_start(&mut self, asset: &AssetPath, current: usize) {
///         println!("[{current}] {asset}");
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _asset: &AssetPath) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback {
    /// Called before a leaf is handled.
    ///
    /// * `asset` - leaf being processed
    /// * `current` - running leaf number (1-indexed)
    fn on_entry_start(&mut self, asset: &AssetPath, current: usize);

    /// Called after a leaf's bytes have been written.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called once a leaf has been handled, whatever the outcome.
    fn on_entry_complete(&mut self, asset: &AssetPath);

    /// Called when the walk has finished.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _asset: &AssetPath, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _asset: &AssetPath) {}

    fn on_complete(&mut self) {}
}
