//! Resolved destination directory type.

use crate::ExtractionError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

/// A resolved destination root for asset extraction.
///
/// This type represents a directory that has been checked to:
/// - Exist on the filesystem
/// - Be a directory (not a file)
/// - Be writable by the current process (Unix)
/// - Be represented as an absolute canonical path
///
/// The walk starts at this directory and appends one validated
/// [`AssetPath`](crate::AssetPath) segment per level it descends, so every
/// path it writes stays underneath it.
///
/// # Examples
///
/// ```no_run
/// use assetmirror_core::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("/sdcard/Android/data/app/files")?;
/// println!("writing under {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates a new `DestDir` after checking the path.
    ///
    /// The directory is NOT created: the caller owns the destination root's
    /// existence and permissions.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::DestinationUnavailable` if:
    /// - The path does not exist
    /// - The path exists but is not a directory
    /// - The path cannot be canonicalized
    /// - The directory is not writable (on Unix)
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let metadata = std::fs::metadata(&path).map_err(|e| unavailable(&path, &e.to_string()))?;
        if !metadata.is_dir() {
            return Err(unavailable(&path, "not a directory"));
        }

        let canonical = path
            .canonicalize()
            .map_err(|e| unavailable(&path, &format!("failed to canonicalize: {e}")))?;

        #[cfg(unix)]
        check_writable(&canonical)?;

        Ok(Self(canonical))
    }

    /// Resolves an optional platform-provided directory.
    ///
    /// Platforms may be unable to provide a destination at all (for example
    /// when external storage is not mounted); `None` is reported as
    /// `ExtractionError::DestinationUnavailable`.
    ///
    /// # Examples
    ///
    /// ```
    /// use assetmirror_core::DestDir;
    /// use assetmirror_core::ExtractionError;
    ///
    /// let result = DestDir::resolve(None);
    /// assert!(matches!(
    ///     result,
    ///     Err(ExtractionError::DestinationUnavailable { .. })
    /// ));
    /// ```
    pub fn resolve(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::new(path),
            None => Err(ExtractionError::DestinationUnavailable {
                reason: "platform did not provide a files directory".to_string(),
            }),
        }
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

fn unavailable(path: &Path, reason: &str) -> ExtractionError {
    ExtractionError::DestinationUnavailable {
        reason: format!("{}: {reason}", path.display()),
    }
}

#[cfg(unix)]
fn check_writable(canonical: &Path) -> Result<()> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path_cstring = CString::new(canonical.as_os_str().as_bytes())
        .map_err(|_| unavailable(canonical, "path contains null byte"))?;

    // SAFETY: access() only reads the NUL-terminated string, which outlives
    // the call.
    #[allow(unsafe_code)]
    let result = unsafe { libc::access(path_cstring.as_ptr(), libc::W_OK) };

    if result != 0 {
        return Err(unavailable(canonical, "directory is not writable"));
    }

    Ok(())
}
