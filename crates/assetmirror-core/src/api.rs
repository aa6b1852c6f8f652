//! High-level public API for asset extraction.

use std::path::PathBuf;

use crate::AssetNamespace;
use crate::DestDir;
use crate::ExtractConfig;
use crate::ExtractionReport;
use crate::Extractor;
use crate::LOG_TARGET;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;

/// What the host platform hands to the extractor: a bundled asset namespace
/// and, if it has one, a writable directory to mirror it into.
pub trait AssetContext {
    /// Namespace type holding the bundled assets.
    type Assets: AssetNamespace + ?Sized;

    /// Returns the bundled asset namespace.
    fn assets(&self) -> &Self::Assets;

    /// Returns the writable destination directory, or `None` if the platform
    /// cannot provide one right now (for example, storage not mounted).
    fn files_dir(&self) -> Option<PathBuf>;
}

/// [`AssetContext`] pairing any namespace with an optional destination.
///
/// # Examples
///
/// ```
/// use assetmirror_core::AssetContext;
/// use assetmirror_core::PackageContext;
/// use assetmirror_core::namespace::MemoryNamespace;
///
/// let context = PackageContext::new(MemoryNamespace::new(), None);
/// assert!(context.files_dir().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PackageContext<N> {
    assets: N,
    files_dir: Option<PathBuf>,
}

impl<N: AssetNamespace> PackageContext<N> {
    /// Creates a context from a namespace and an optional destination.
    pub fn new(assets: N, files_dir: Option<PathBuf>) -> Self {
        Self { assets, files_dir }
    }
}

impl<N: AssetNamespace> AssetContext for PackageContext<N> {
    type Assets = N;

    fn assets(&self) -> &N {
        &self.assets
    }

    fn files_dir(&self) -> Option<PathBuf> {
        self.files_dir.clone()
    }
}

/// Mirrors the context's assets into its files directory.
///
/// This is the fire-and-forget entry point meant for application startup:
/// nothing is returned and nothing panics. If the destination cannot be
/// resolved, or the asset root cannot be listed, exactly one error is
/// logged and nothing is written. Every other failure is contained at the
/// node where it happened and logged there.
///
/// Existing files are overwritten only when `force` is set. Empty source
/// directories are not recreated; use [`extract_assets_with_config`] with
/// [`EmptyDirPolicy::Create`](crate::EmptyDirPolicy::Create) for that.
///
/// # Examples
///
/// ```
/// use assetmirror_core::PackageContext;
/// use assetmirror_core::extract_assets;
/// use assetmirror_core::namespace::MemoryNamespace;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// let assets = MemoryNamespace::new().with_file("config/defaults.toml", "level = 1")?;
/// let context = PackageContext::new(assets, Some(dir.path().to_path_buf()));
///
/// extract_assets(&context, false);
/// assert!(dir.path().join("config/defaults.toml").is_file());
/// # Ok(())
/// # }
/// ```
pub fn extract_assets<C: AssetContext + ?Sized>(context: &C, force: bool) {
    let config = ExtractConfig::with_force(force);
    if let Err(e) = extract_assets_with_config(context, &config, &mut NoopProgress) {
        tracing::error!(
            target: LOG_TARGET,
            error = %e,
            "asset extraction aborted"
        );
    }
}

/// Mirrors the context's assets with full control over the walk.
///
/// # Errors
///
/// Returns `ExtractionError::DestinationUnavailable` if the context has no
/// usable files directory, or `ExtractionError::ListFailed` if the starting
/// node cannot be listed. Nothing is written in either case.
pub fn extract_assets_with_config<C: AssetContext + ?Sized>(
    context: &C,
    config: &ExtractConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let dest = DestDir::resolve(context.files_dir())?;
    Extractor::new(context.assets(), &dest, config, progress).run()
}

/// Mirrors `namespace` into the existing directory `dest`.
///
/// # Errors
///
/// Returns `ExtractionError::DestinationUnavailable` if `dest` is not an
/// existing writable directory, or `ExtractionError::ListFailed` if the
/// starting node cannot be listed.
///
/// # Examples
///
/// ```
/// use assetmirror_core::ExtractConfig;
/// use assetmirror_core::NoopProgress;
/// use assetmirror_core::mirror_into;
/// use assetmirror_core::namespace::MemoryNamespace;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// let assets = MemoryNamespace::new()
///     .with_file("a/b.txt", "x")?
///     .with_file("a/c/d.txt", "y")?;
///
/// let report = mirror_into(&assets, dir.path(), &ExtractConfig::default(), &mut NoopProgress)?;
/// assert_eq!(report.files_copied, 2);
/// assert_eq!(std::fs::read_to_string(dir.path().join("a/c/d.txt"))?, "y");
/// # Ok(())
/// # }
/// ```
pub fn mirror_into<N: AssetNamespace + ?Sized>(
    namespace: &N,
    dest: impl Into<PathBuf>,
    config: &ExtractConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let dest = DestDir::new(dest)?;
    Extractor::new(namespace, &dest, config, progress).run()
}
