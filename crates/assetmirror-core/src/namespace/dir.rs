//! Asset namespace backed by a directory on disk.

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use super::AssetNamespace;
use crate::AssetPath;
use crate::ExtractionError;
use crate::LOG_TARGET;
use crate::NodeKind;
use crate::Result;

/// Exposes an unpacked asset directory as a read-only namespace.
///
/// Listings are sorted by name so extraction order is stable across runs.
/// Symlinks to files are followed. Symlinks to directories are left out of
/// listings, so a link back to an ancestor cannot make the walk recurse.
/// Entries whose names are not valid UTF-8 cannot be addressed by an
/// [`AssetPath`] and are also left out.
#[derive(Debug, Clone)]
pub struct DirNamespace {
    root: PathBuf,
}

impl DirNamespace {
    /// Opens `root` as a namespace.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Io` if `root` is not an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !fs::metadata(&root)?.is_dir() {
            return Err(ExtractionError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("asset root is not a directory: {}", root.display()),
            )));
        }
        Ok(Self { root })
    }

    /// Returns the directory this namespace reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &AssetPath) -> PathBuf {
        path.mirror_under(&self.root)
    }
}

fn is_dir_symlink(entry: &fs::DirEntry) -> io::Result<bool> {
    if !entry.file_type()?.is_symlink() {
        return Ok(false);
    }
    // Dangling links stay listed and fail on open like any unreadable file.
    Ok(fs::metadata(entry.path()).is_ok_and(|target| target.is_dir()))
}

impl AssetNamespace for DirNamespace {
    fn list(&self, path: &AssetPath) -> io::Result<Vec<String>> {
        let full = self.resolve(path);
        let metadata = match fs::metadata(&full) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        if !metadata.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&full)? {
            let entry = entry?;
            if is_dir_symlink(&entry)? {
                tracing::warn!(
                    target: LOG_TARGET,
                    link = %entry.path().display(),
                    "skipping directory symlink"
                );
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    tracing::warn!(
                        target: LOG_TARGET,
                        parent = %full.display(),
                        name = ?raw,
                        "ignoring asset with a non UTF-8 name"
                    );
                }
            }
        }
        names.sort_unstable();
        Ok(names)
    }

    fn open(&self, path: &AssetPath) -> io::Result<Box<dyn Read + '_>> {
        let full = self.resolve(path);
        // File::open succeeds on directories on Unix; reject them up front.
        if fs::metadata(&full)?.is_dir() {
            return Err(io::Error::other(format!(
                "asset '{path}' is a directory"
            )));
        }
        Ok(Box::new(BufReader::new(File::open(full)?)))
    }

    fn kind(&self, path: &AssetPath) -> Option<NodeKind> {
        let metadata = fs::metadata(self.resolve(path)).ok()?;
        if metadata.is_dir() {
            Some(NodeKind::Directory)
        } else {
            Some(NodeKind::File)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn path(s: &str) -> AssetPath {
        AssetPath::parse(s).unwrap()
    }

    fn sample() -> (TempDir, DirNamespace) {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("a/c")).unwrap();
        fs::create_dir_all(temp.path().join("empty")).unwrap();
        fs::write(temp.path().join("a/b.txt"), "x").unwrap();
        fs::write(temp.path().join("a/c/d.txt"), "y").unwrap();
        let ns = DirNamespace::new(temp.path()).unwrap();
        (temp, ns)
    }

    #[test]
    fn test_new_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("f");
        fs::write(&file, "").unwrap();
        assert!(DirNamespace::new(&file).is_err());
        assert!(DirNamespace::new(temp.path().join("missing")).is_err());
    }

    #[test]
    fn test_list_sorted() {
        let (_temp, ns) = sample();
        assert_eq!(ns.list(&AssetPath::root()).unwrap(), ["a", "empty"]);
        assert_eq!(ns.list(&path("a")).unwrap(), ["b.txt", "c"]);
    }

    #[test]
    fn test_list_of_file_and_missing_is_empty() {
        let (_temp, ns) = sample();
        assert!(ns.list(&path("a/b.txt")).unwrap().is_empty());
        assert!(ns.list(&path("missing")).unwrap().is_empty());
    }

    #[test]
    fn test_open_reads_content() {
        let (_temp, ns) = sample();
        let mut content = String::new();
        ns.open(&path("a/c/d.txt"))
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "y");
    }

    #[test]
    fn test_open_directory_fails() {
        let (_temp, ns) = sample();
        assert!(ns.open(&path("empty")).is_err());
        assert!(ns.open(&path("missing")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_symlink_cycle_not_followed() {
        use crate::ExtractConfig;
        use crate::NoopProgress;
        use crate::mirror_into;
        use std::os::unix::fs::symlink;

        let source = TempDir::new().unwrap();
        fs::create_dir(source.path().join("a")).unwrap();
        fs::write(source.path().join("a/f.txt"), "f").unwrap();
        symlink("..", source.path().join("a/loop")).unwrap();
        symlink("f.txt", source.path().join("a/alias.txt")).unwrap();
        let ns = DirNamespace::new(source.path()).unwrap();

        assert_eq!(ns.list(&path("a")).unwrap(), ["alias.txt", "f.txt"]);

        let dest = TempDir::new().unwrap();
        let report =
            mirror_into(&ns, dest.path(), &ExtractConfig::default(), &mut NoopProgress).unwrap();

        assert_eq!(report.files_copied, 2);
        assert_eq!(report.nodes_failed, 0);
        assert_eq!(fs::read_to_string(dest.path().join("a/alias.txt")).unwrap(), "f");
        assert!(!dest.path().join("a/loop").exists());
    }

    #[test]
    fn test_kind() {
        let (_temp, ns) = sample();
        assert_eq!(ns.kind(&path("empty")), Some(NodeKind::Directory));
        assert_eq!(ns.kind(&path("a/b.txt")), Some(NodeKind::File));
        assert_eq!(ns.kind(&path("missing")), None);
    }
}
