//! Recursive mirroring of an asset namespace into a destination directory.

use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;
use std::time::Instant;

use crate::AssetNamespace;
use crate::AssetPath;
use crate::DestDir;
use crate::EmptyDirPolicy;
use crate::ExtractConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::LOG_TARGET;
use crate::NodeKind;
use crate::ProgressCallback;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;

/// Result of a leaf copy whose source could be opened (or was never needed).
#[derive(Debug)]
enum LeafOutcome {
    Copied(u64),
    AlreadyExists,
    WriteFailed(ExtractionError),
}

/// Mirrors one asset namespace into one destination directory.
///
/// An `Extractor` lives for a single walk. The node the walk starts from
/// (`ExtractConfig::source_root`) maps onto the destination root, and every
/// node below it maps onto the same relative path underneath. A starting
/// node that is a file is copied into the destination root under its own
/// name.
///
/// Failures are contained per node: only a failure to list the starting
/// node aborts the walk. Everything else is logged under
/// [`LOG_TARGET`](crate::LOG_TARGET), counted in the returned
/// [`ExtractionReport`], and the walk moves on to the next sibling.
///
/// # Examples
///
/// ```no_run
/// use assetmirror_core::DestDir;
/// use assetmirror_core::ExtractConfig;
/// use assetmirror_core::Extractor;
/// use assetmirror_core::NoopProgress;
/// use assetmirror_core::namespace::DirNamespace;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let assets = DirNamespace::new("bundle/assets")?;
/// let dest = DestDir::new("/var/lib/app")?;
/// let config = ExtractConfig::default();
/// let mut progress = NoopProgress;
///
/// let report = Extractor::new(&assets, &dest, &config, &mut progress).run()?;
/// println!("copied {} files", report.files_copied);
/// # Ok(())
/// # }
/// ```
pub struct Extractor<'a, N: AssetNamespace + ?Sized> {
    namespace: &'a N,
    dest: &'a DestDir,
    config: &'a ExtractConfig,
    progress: &'a mut dyn ProgressCallback,
    report: ExtractionReport,
    buffer: CopyBuffer,
    leaves_seen: usize,
}

impl<'a, N: AssetNamespace + ?Sized> Extractor<'a, N> {
    /// Prepares a walk of `namespace` into `dest`.
    #[must_use]
    pub fn new(
        namespace: &'a N,
        dest: &'a DestDir,
        config: &'a ExtractConfig,
        progress: &'a mut dyn ProgressCallback,
    ) -> Self {
        Self {
            namespace,
            dest,
            config,
            progress,
            report: ExtractionReport::new(),
            buffer: CopyBuffer::new(),
            leaves_seen: 0,
        }
    }

    /// Runs the walk to completion.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::ListFailed` if the starting node cannot be
    /// listed. Nothing is written in that case. All other failures are
    /// contained and reported through the returned report.
    pub fn run(mut self) -> Result<ExtractionReport> {
        let start = Instant::now();
        let root = self.config.source_root.clone();

        let children = self
            .namespace
            .list(&root)
            .map_err(|source| ExtractionError::ListFailed {
                path: root.to_string(),
                source,
            })?;

        tracing::info!(
            target: LOG_TARGET,
            source = %root,
            dest = %self.dest.as_path().display(),
            force = self.config.force,
            "extracting assets"
        );

        if children.is_empty() {
            self.mirror_root_leaf(&root);
        } else {
            let dest = self.dest;
            self.mirror_children(&root, dest.as_path(), children);
        }

        self.progress.on_complete();
        self.report.duration = start.elapsed();

        tracing::info!(
            target: LOG_TARGET,
            files_copied = self.report.files_copied,
            files_skipped = self.report.files_skipped,
            directories_created = self.report.directories_created,
            nodes_failed = self.report.nodes_failed,
            bytes = self.report.bytes_written,
            "asset extraction finished"
        );

        Ok(self.report)
    }

    /// A childless starting node other than the namespace root may name a
    /// single file; it lands directly in the destination root.
    fn mirror_root_leaf(&mut self, root: &AssetPath) {
        let name = match root.file_name() {
            Some(name) if self.namespace.kind(root) != Some(NodeKind::Directory) => name,
            _ => {
                tracing::info!(target: LOG_TARGET, source = %root, "no assets to extract");
                return;
            }
        };
        let dest = self.dest.as_path().join(name);
        self.mirror_leaf(root, &dest);
    }

    fn mirror_node(&mut self, source: &AssetPath, dest: &Path) {
        let children = match self.namespace.list(source) {
            Ok(children) => children,
            Err(e) => {
                tracing::error!(
                    target: LOG_TARGET,
                    path = %source,
                    error = %e,
                    "failed to list assets"
                );
                self.fail(format!("failed to list '{source}': {e}"));
                return;
            }
        };

        if children.is_empty() {
            self.mirror_leaf(source, dest);
            return;
        }

        self.ensure_dir(dest);
        self.mirror_children(source, dest, children);
    }

    fn mirror_children(&mut self, parent: &AssetPath, dest: &Path, children: Vec<String>) {
        for name in children {
            match parent.join(&name) {
                // `name` is a single validated segment, safe to append.
                Ok(child) => self.mirror_node(&child, &dest.join(&name)),
                Err(e) => {
                    tracing::warn!(
                        target: LOG_TARGET,
                        parent = %parent,
                        name = %name.escape_debug(),
                        error = %e,
                        "skipping invalid asset name"
                    );
                    self.fail(format!("invalid asset name {name:?} under '{parent}'"));
                }
            }
        }
    }

    fn mirror_leaf(&mut self, source: &AssetPath, dest: &Path) {
        match self.namespace.kind(source) {
            Some(NodeKind::Directory) => self.mirror_empty_dir(source, dest),
            Some(NodeKind::File) => {
                self.begin_leaf(source);
                match self.copy_leaf(source, dest) {
                    Ok(outcome) => self.record(source, dest, outcome),
                    Err(e) => {
                        tracing::warn!(
                            target: LOG_TARGET,
                            path = %source,
                            error = %e,
                            "failed to open asset"
                        );
                        self.fail(format!("failed to open '{source}': {e}"));
                    }
                }
                self.progress.on_entry_complete(source);
            }
            None => {
                self.begin_leaf(source);
                self.copy_leaf_or_skip(source, dest);
                self.progress.on_entry_complete(source);
            }
        }
    }

    /// Leaf handling for namespaces that cannot classify nodes.
    ///
    /// A childless node is either a file or an empty directory, and the only
    /// way to tell is to try opening it. A node that cannot be opened is
    /// taken to be an empty directory and produces nothing at the
    /// destination.
    fn copy_leaf_or_skip(&mut self, source: &AssetPath, dest: &Path) {
        match self.copy_leaf(source, dest) {
            Ok(outcome) => self.record(source, dest, outcome),
            Err(e) => {
                tracing::debug!(
                    target: LOG_TARGET,
                    path = %source,
                    error = %e,
                    "asset cannot be opened, treating it as a directory"
                );
                self.report.leaves_unreadable += 1;
            }
        }
    }

    /// Copies one leaf. The source is opened before the destination is
    /// touched, so `Err` (source cannot be opened) means nothing was written.
    fn copy_leaf(&mut self, source: &AssetPath, dest: &Path) -> io::Result<LeafOutcome> {
        if !self.config.force && dest.exists() {
            return Ok(LeafOutcome::AlreadyExists);
        }

        let mut reader = self.namespace.open(source)?;

        let mut writer = match File::create(dest) {
            Ok(file) => file,
            Err(e) => return Ok(LeafOutcome::WriteFailed(ExtractionError::Io(e))),
        };

        Ok(
            match copy_with_buffer(&mut reader, &mut writer, &mut self.buffer) {
                Ok(bytes) => LeafOutcome::Copied(bytes),
                Err(e) => LeafOutcome::WriteFailed(e),
            },
        )
    }

    fn record(&mut self, source: &AssetPath, dest: &Path, outcome: LeafOutcome) {
        match outcome {
            LeafOutcome::Copied(bytes) => {
                tracing::debug!(
                    target: LOG_TARGET,
                    path = %source,
                    dest = %dest.display(),
                    bytes,
                    "copied asset"
                );
                self.report.files_copied += 1;
                self.report.bytes_written += bytes;
                self.progress.on_bytes_written(bytes);
            }
            LeafOutcome::AlreadyExists => {
                tracing::info!(
                    target: LOG_TARGET,
                    path = %source,
                    dest = %dest.display(),
                    "asset already exists, skipping"
                );
                self.report.files_skipped += 1;
            }
            LeafOutcome::WriteFailed(e) => {
                tracing::warn!(
                    target: LOG_TARGET,
                    path = %source,
                    dest = %dest.display(),
                    error = %e,
                    "failed to write asset"
                );
                self.fail(format!("failed to write '{}': {e}", dest.display()));
            }
        }
    }

    fn mirror_empty_dir(&mut self, source: &AssetPath, dest: &Path) {
        match self.config.empty_dirs {
            EmptyDirPolicy::Skip => {
                tracing::debug!(
                    target: LOG_TARGET,
                    path = %source,
                    "skipping empty asset directory"
                );
            }
            EmptyDirPolicy::Create => self.ensure_dir(dest),
        }
    }

    /// Creates `dest` unless it already is a directory. Failure is logged
    /// and the walk continues; anything below `dest` then fails on its own.
    fn ensure_dir(&mut self, dest: &Path) {
        if dest.is_dir() {
            return;
        }

        match fs::create_dir_all(dest) {
            Ok(()) => {
                tracing::debug!(
                    target: LOG_TARGET,
                    dest = %dest.display(),
                    "created directory"
                );
                self.report.directories_created += 1;
            }
            Err(e) => {
                tracing::warn!(
                    target: LOG_TARGET,
                    dest = %dest.display(),
                    error = %e,
                    "failed to create directory"
                );
                self.fail(format!("failed to create '{}': {e}", dest.display()));
            }
        }
    }

    fn begin_leaf(&mut self, source: &AssetPath) {
        self.leaves_seen += 1;
        self.progress.on_entry_start(source, self.leaves_seen);
    }

    fn fail(&mut self, warning: String) {
        self.report.nodes_failed += 1;
        self.report.add_warning(warning);
    }
}
