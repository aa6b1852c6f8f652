//! Asset namespace backed by a TAR bundle (optionally gzip-compressed).

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

use super::AssetNamespace;
use super::MemoryNamespace;
use crate::AssetPath;
use crate::ExtractionError;
use crate::LOG_TARGET;
use crate::NodeKind;
use crate::Result;

/// Read-only view of a TAR bundle.
///
/// TAR archives can only be read front to back, so the whole bundle is
/// loaded into memory at construction. Regular files and directories are
/// kept; links and special entries are skipped.
#[derive(Debug, Clone)]
pub struct TarNamespace {
    inner: MemoryNamespace,
}

impl TarNamespace {
    /// Opens an uncompressed `.tar` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid TAR
    /// archive.
    pub fn from_tar_path(path: impl AsRef<Path>, prefix: Option<&str>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::new(BufReader::new(file), prefix)
    }

    /// Opens a gzip-compressed `.tar.gz` / `.tgz` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, decompressed, or parsed.
    pub fn from_tar_gz_path(path: impl AsRef<Path>, prefix: Option<&str>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::new(GzDecoder::new(BufReader::new(file)), prefix)
    }

    /// Loads a TAR stream. With a `prefix`, only entries underneath it are
    /// visible and the prefix becomes the namespace root.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidArchive` if the stream is not a valid
    /// TAR archive.
    pub fn new<R: Read>(reader: R, prefix: Option<&str>) -> Result<Self> {
        let prefix = AssetPath::parse(prefix.unwrap_or_default())?;
        let mut archive = ::tar::Archive::new(reader);
        let mut inner = MemoryNamespace::new();
        let mut loaded = 0usize;

        let entries = archive
            .entries()
            .map_err(|e| ExtractionError::InvalidArchive(format!("failed to read TAR entries: {e}")))?;

        for entry_result in entries {
            let mut entry = entry_result.map_err(|e| {
                ExtractionError::InvalidArchive(format!("failed to read TAR entry: {e}"))
            })?;

            let raw_path = entry
                .path()
                .map_err(|e| ExtractionError::InvalidArchive(format!("invalid path: {e}")))?
                .into_owned();
            let Some(name) = raw_path.to_str().map(str::to_string) else {
                tracing::warn!(
                    target: LOG_TARGET,
                    entry = %raw_path.display(),
                    "skipping TAR entry with a non UTF-8 name"
                );
                continue;
            };

            let kind = match entry.header().entry_type() {
                ::tar::EntryType::Regular | ::tar::EntryType::Continuous => NodeKind::File,
                ::tar::EntryType::Directory => NodeKind::Directory,
                other => {
                    tracing::debug!(
                        target: LOG_TARGET,
                        entry = %name,
                        entry_type = ?other,
                        "skipping unsupported TAR entry type"
                    );
                    continue;
                }
            };

            let relative = match AssetPath::parse(strip_current_dir(&name))
                .map(|full| full.strip_prefix(&prefix))
            {
                Ok(Some(relative)) if relative.is_root() => continue,
                Ok(Some(relative)) => relative,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!(
                        target: LOG_TARGET,
                        entry = %name,
                        error = %e,
                        "skipping unusable TAR entry"
                    );
                    continue;
                }
            };

            let inserted = match kind {
                NodeKind::Directory => inner.insert_dir(relative.as_str()),
                NodeKind::File => {
                    let mut data = Vec::new();
                    entry.read_to_end(&mut data).map_err(|e| {
                        ExtractionError::InvalidArchive(format!(
                            "failed to read TAR entry '{name}': {e}"
                        ))
                    })?;
                    inner.insert_file(relative.as_str(), data)
                }
            };

            match inserted {
                Ok(()) => loaded += 1,
                Err(e) => tracing::warn!(
                    target: LOG_TARGET,
                    entry = %name,
                    error = %e,
                    "skipping conflicting TAR entry"
                ),
            }
        }

        tracing::debug!(
            target: LOG_TARGET,
            entries = loaded,
            prefix = %prefix,
            "loaded TAR bundle"
        );

        Ok(Self { inner })
    }
}

/// Drops the leading `./` components that `tar -C dir .` puts on every name.
/// A bare `.` or `./` becomes the root.
fn strip_current_dir(name: &str) -> &str {
    let mut rest = name;
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped.trim_start_matches('/');
        } else if rest == "." {
            return "";
        } else {
            return rest;
        }
    }
}

impl AssetNamespace for TarNamespace {
    fn list(&self, path: &AssetPath) -> io::Result<Vec<String>> {
        self.inner.list(path)
    }

    fn open(&self, path: &AssetPath) -> io::Result<Box<dyn Read + '_>> {
        self.inner.open(path)
    }

    fn kind(&self, path: &AssetPath) -> Option<NodeKind> {
        self.inner.kind(path)
    }
}
