//! Opening an asset source from disk by format.

use std::path::Path;

use super::AssetNamespace;
use super::DirNamespace;
use super::TarNamespace;
use super::ZipNamespace;
use crate::AssetPath;
use crate::LOG_TARGET;
use crate::Result;
use crate::formats::PackageFormat;
use crate::formats::detect_format;

/// Opens `path` as an asset namespace, choosing the backend by format.
///
/// `prefix` scopes the namespace to a subdirectory of the package, such as
/// `assets` inside an APK. For a directory source the prefix is joined onto
/// the directory.
///
/// # Errors
///
/// Returns `ExtractionError::UnsupportedFormat` if the format is not
/// recognized, `ExtractionError::InvalidArchive` if the package cannot be
/// parsed, or `ExtractionError::InvalidAssetPath` for a bad prefix.
///
/// # Examples
///
/// ```no_run
/// use assetmirror_core::AssetPath;
/// use assetmirror_core::namespace::open_package;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let assets = open_package("app.apk", Some("assets"))?;
/// let top_level = assets.list(&AssetPath::root())?;
/// # Ok(())
/// # }
/// ```
pub fn open_package(
    path: impl AsRef<Path>,
    prefix: Option<&str>,
) -> Result<Box<dyn AssetNamespace>> {
    let path = path.as_ref();
    let format = detect_format(path)?;

    tracing::debug!(
        target: LOG_TARGET,
        source = %path.display(),
        format = format.name(),
        "opening asset package"
    );

    let namespace: Box<dyn AssetNamespace> = match format {
        PackageFormat::Directory => {
            let prefix = AssetPath::parse(prefix.unwrap_or_default())?;
            Box::new(DirNamespace::new(prefix.mirror_under(path))?)
        }
        PackageFormat::Zip => Box::new(ZipNamespace::from_path(path, prefix)?),
        PackageFormat::Tar => Box::new(TarNamespace::from_tar_path(path, prefix)?),
        PackageFormat::TarGz => Box::new(TarNamespace::from_tar_gz_path(path, prefix)?),
    };

    Ok(namespace)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ExtractionError;
    use crate::test_utils::TarTestBuilder;
    use crate::test_utils::ZipTestBuilder;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_apk_with_prefix() {
        let temp = TempDir::new().unwrap();
        let apk = temp.path().join("app.apk");
        let data = ZipTestBuilder::new()
            .add_file("classes.dex", b"dex")
            .add_file("assets/music/theme.ogg", b"ogg")
            .build();
        fs::write(&apk, data).unwrap();

        let ns = open_package(&apk, Some("assets")).unwrap();
        assert_eq!(ns.list(&AssetPath::root()).unwrap(), ["music"]);
    }

    #[test]
    fn test_open_tar_gz() {
        let temp = TempDir::new().unwrap();
        let bundle = temp.path().join("assets.tar.gz");
        fs::write(&bundle, TarTestBuilder::new().add_file("a.txt", b"a").build_gz()).unwrap();

        let ns = open_package(&bundle, None).unwrap();
        assert_eq!(ns.list(&AssetPath::root()).unwrap(), ["a.txt"]);
    }

    #[test]
    fn test_open_directory_with_prefix() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src/assets/img")).unwrap();
        fs::write(temp.path().join("src/assets/img/logo.png"), "png").unwrap();

        let ns = open_package(temp.path(), Some("src/assets")).unwrap();
        assert_eq!(ns.list(&AssetPath::root()).unwrap(), ["img"]);
    }

    #[test]
    fn test_open_unsupported() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("assets.rar");
        fs::write(&file, "rar").unwrap();

        assert!(matches!(
            open_package(&file, None),
            Err(ExtractionError::UnsupportedFormat)
        ));
    }
}
