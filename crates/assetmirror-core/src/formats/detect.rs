//! Package format detection.

use std::path::Path;

use crate::ExtractionError;
use crate::Result;

/// Asset sources that can be opened as a namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageFormat {
    /// Unpacked directory on disk.
    Directory,
    /// ZIP-family package (`.zip`, `.apk`, `.jar`, `.aar`).
    Zip,
    /// Tar bundle (uncompressed).
    Tar,
    /// Gzip-compressed tar bundle.
    TarGz,
}

impl PackageFormat {
    /// Returns a short lowercase name for the format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Zip => "zip",
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
        }
    }
}

/// Detects the package format of `path`.
///
/// Existing directories are always [`PackageFormat::Directory`]; everything
/// else is classified by extension, case-insensitively.
///
/// # Errors
///
/// Returns `ExtractionError::UnsupportedFormat` if the extension is missing
/// or not recognized.
pub fn detect_format(path: &Path) -> Result<PackageFormat> {
    if path.is_dir() {
        return Ok(PackageFormat::Directory);
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or(ExtractionError::UnsupportedFormat)?;

    match extension.to_ascii_lowercase().as_str() {
        "zip" | "apk" | "jar" | "aar" => Ok(PackageFormat::Zip),
        "tar" => Ok(PackageFormat::Tar),
        "tgz" => Ok(PackageFormat::TarGz),
        "gz" => {
            let is_tar = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(|stem| stem.to_ascii_lowercase().ends_with(".tar"));
            if is_tar {
                Ok(PackageFormat::TarGz)
            } else {
                Err(ExtractionError::UnsupportedFormat)
            }
        }
        _ => Err(ExtractionError::UnsupportedFormat),
    }
}
