//! Asset namespace backed by a ZIP-family package (zip, apk, jar, aar).

use std::cell::RefCell;
use std::cell::RefMut;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;

use flate2::CrcReader;
use flate2::read::DeflateDecoder;
use zip::CompressionMethod;

use super::AssetNamespace;
use super::tree::Node;
use super::tree::NodeTree;
use crate::AssetPath;
use crate::ExtractionError;
use crate::LOG_TARGET;
use crate::NodeKind;
use crate::Result;

/// Where a file's data lives inside the package.
#[derive(Debug, Clone, Copy)]
struct EntrySpan {
    data_start: u64,
    compressed_size: u64,
    size: u64,
    crc32: u32,
    method: CompressionMethod,
}

/// Read-only view of a ZIP package, optionally scoped to a subdirectory.
///
/// The central directory is indexed once at construction. Directories that
/// only exist implicitly (as a prefix of file names) are materialized in the
/// index, and explicit directory entries (`name/`) are kept even when empty,
/// so this namespace can classify every node. Listings follow the order of
/// the central directory.
///
/// Opened entries are streamed straight from the package and inflated on
/// the fly; their CRC-32 is checked once the last byte has been read. Only
/// one entry can be open at a time.
///
/// # Examples
///
/// ```no_run
/// use assetmirror_core::AssetNamespace;
/// use assetmirror_core::AssetPath;
/// use assetmirror_core::namespace::ZipNamespace;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Only what lives under `assets/` inside the APK
/// let assets = ZipNamespace::from_path("app.apk", Some("assets"))?;
/// for name in assets.list(&AssetPath::root())? {
///     println!("{name}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct ZipNamespace<R> {
    reader: RefCell<R>,
    tree: NodeTree<EntrySpan>,
}

impl ZipNamespace<BufReader<File>> {
    /// Opens a package file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not a valid ZIP
    /// archive.
    pub fn from_path(path: impl AsRef<Path>, prefix: Option<&str>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::new(BufReader::new(file), prefix)
    }
}

impl<R: Read + Seek> ZipNamespace<R> {
    /// Indexes a ZIP archive read from `reader`.
    ///
    /// With a `prefix`, only entries underneath it are visible and the
    /// prefix itself becomes the namespace root.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidArchive` if the archive cannot be
    /// parsed, or `ExtractionError::InvalidAssetPath` if `prefix` is invalid.
    /// Individual entries with unusable names are skipped with a warning.
    pub fn new(reader: R, prefix: Option<&str>) -> Result<Self> {
        let prefix = AssetPath::parse(prefix.unwrap_or_default())?;
        let mut archive = ::zip::ZipArchive::new(reader).map_err(|e| {
            ExtractionError::InvalidArchive(format!("failed to open ZIP archive: {e}"))
        })?;

        let mut tree = NodeTree::new();
        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index).map_err(|e| {
                ExtractionError::InvalidArchive(format!("failed to read ZIP entry {index}: {e}"))
            })?;
            let name = entry.name().to_string();
            let is_dir = entry.is_dir();
            let encrypted = entry.encrypted();
            let span = EntrySpan {
                data_start: entry.data_start(),
                compressed_size: entry.compressed_size(),
                size: entry.size(),
                crc32: entry.crc32(),
                method: entry.compression(),
            };
            drop(entry);

            if encrypted {
                tracing::warn!(
                    target: LOG_TARGET,
                    entry = %name,
                    "skipping encrypted ZIP entry"
                );
                continue;
            }

            if let Err(e) = index_entry(&mut tree, &prefix, &name, is_dir, span) {
                tracing::warn!(
                    target: LOG_TARGET,
                    entry = %name,
                    error = %e,
                    "skipping unusable ZIP entry"
                );
            }
        }

        tracing::debug!(
            target: LOG_TARGET,
            entries = archive.len(),
            nodes = tree.len(),
            prefix = %prefix,
            "indexed ZIP package"
        );

        Ok(Self {
            reader: RefCell::new(archive.into_inner()),
            tree,
        })
    }
}

fn index_entry(
    tree: &mut NodeTree<EntrySpan>,
    prefix: &AssetPath,
    name: &str,
    is_dir: bool,
    span: EntrySpan,
) -> Result<()> {
    let full = AssetPath::parse(name)?;
    let Some(relative) = full.strip_prefix(prefix) else {
        return Ok(());
    };

    if is_dir {
        tree.ensure_dir(&relative)
    } else if relative.is_root() {
        Err(ExtractionError::InvalidAssetPath {
            path: name.to_string(),
            reason: "file shadows the namespace root",
        })
    } else {
        tree.insert_leaf(&relative, span)
    }
}

/// The compressed bytes of one entry, read through the shared package reader.
struct EntryData<'a, R> {
    reader: RefMut<'a, R>,
    remaining: u64,
}

impl<R: Read> Read for EntryData<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Ok(0);
        }
        let max = usize::try_from(self.remaining).map_or(buf.len(), |r| r.min(buf.len()));
        let n = self.reader.read(&mut buf[..max])?;
        self.remaining -= n as u64;
        Ok(n)
    }
}

/// Decompressed entry stream that fails at EOF if size or CRC-32 differ
/// from the central directory.
struct VerifiedEntry<'a> {
    inner: CrcReader<Box<dyn Read + 'a>>,
    expected_crc: u32,
    expected_size: u64,
    bytes_read: u64,
}

impl Read for VerifiedEntry<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.bytes_read += n as u64;
        if n == 0 && !buf.is_empty() {
            if self.bytes_read != self.expected_size {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!(
                        "entry ended after {} of {} bytes",
                        self.bytes_read, self.expected_size
                    ),
                ));
            }
            if self.inner.crc().sum() != self.expected_crc {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "entry CRC-32 mismatch",
                ));
            }
        }
        Ok(n)
    }
}

impl<R: Read + Seek> AssetNamespace for ZipNamespace<R> {
    fn list(&self, path: &AssetPath) -> io::Result<Vec<String>> {
        Ok(self.tree.children(path))
    }

    fn open(&self, path: &AssetPath) -> io::Result<Box<dyn Read + '_>> {
        let span = match self.tree.get(path) {
            Some(Node::Leaf(span)) => *span,
            Some(Node::Directory(_)) => {
                return Err(io::Error::other(format!("asset '{path}' is a directory")));
            }
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("asset '{path}' not found"),
                ));
            }
        };

        let mut reader = self
            .reader
            .try_borrow_mut()
            .map_err(|_| io::Error::other("another package entry is still open"))?;
        reader.seek(SeekFrom::Start(span.data_start))?;
        let data = EntryData {
            reader,
            remaining: span.compressed_size,
        };

        let body: Box<dyn Read + '_> = match span.method {
            CompressionMethod::Stored => Box::new(data),
            CompressionMethod::Deflated => Box::new(DeflateDecoder::new(data)),
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    format!("asset '{path}' uses unsupported compression {other:?}"),
                ));
            }
        };

        Ok(Box::new(VerifiedEntry {
            inner: CrcReader::new(body),
            expected_crc: span.crc32,
            expected_size: span.size,
            bytes_read: 0,
        }))
    }

    fn kind(&self, path: &AssetPath) -> Option<NodeKind> {
        self.tree.kind(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::ZipTestBuilder;
    use std::io::Cursor;

    fn path(s: &str) -> AssetPath {
        AssetPath::parse(s).unwrap()
    }

    fn read_all<N: AssetNamespace>(ns: &N, p: &str) -> String {
        let mut out = String::new();
        ns.open(&path(p))
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_implicit_directories() {
        let data = ZipTestBuilder::new()
            .add_file("a/b.txt", b"x")
            .add_file("a/c/d.txt", b"y")
            .build();
        let ns = ZipNamespace::new(Cursor::new(data), None).unwrap();

        assert_eq!(ns.list(&AssetPath::root()).unwrap(), ["a"]);
        assert_eq!(ns.list(&path("a")).unwrap(), ["b.txt", "c"]);
        assert_eq!(ns.kind(&path("a/c")), Some(NodeKind::Directory));
        assert_eq!(read_all(&ns, "a/b.txt"), "x");
        assert_eq!(read_all(&ns, "a/c/d.txt"), "y");
    }

    #[test]
    fn test_explicit_empty_directory() {
        let data = ZipTestBuilder::new()
            .add_directory("saves/")
            .add_file("readme.txt", b"hi")
            .build();
        let ns = ZipNamespace::new(Cursor::new(data), None).unwrap();

        assert_eq!(ns.kind(&path("saves")), Some(NodeKind::Directory));
        assert!(ns.list(&path("saves")).unwrap().is_empty());
        assert!(ns.open(&path("saves")).is_err());
    }

    #[test]
    fn test_prefix_scopes_namespace() {
        let data = ZipTestBuilder::new()
            .add_file("AndroidManifest.xml", b"<manifest/>")
            .add_file("assets/fonts/mono.ttf", b"font")
            .add_file("assets/config.ini", b"[main]")
            .add_file("res/layout/main.xml", b"<layout/>")
            .build();
        let ns = ZipNamespace::new(Cursor::new(data), Some("assets")).unwrap();

        assert_eq!(ns.list(&AssetPath::root()).unwrap(), ["fonts", "config.ini"]);
        assert_eq!(read_all(&ns, "fonts/mono.ttf"), "font");
        assert!(ns.open(&path("AndroidManifest.xml")).is_err());
    }

    #[test]
    fn test_traversal_entries_skipped() {
        let data = ZipTestBuilder::new()
            .add_file("../evil.txt", b"evil")
            .add_file("good.txt", b"good")
            .build();
        let ns = ZipNamespace::new(Cursor::new(data), None).unwrap();

        assert_eq!(ns.list(&AssetPath::root()).unwrap(), ["good.txt"]);
    }

    #[test]
    fn test_invalid_archive() {
        let result = ZipNamespace::new(Cursor::new(b"not a zip".to_vec()), None);
        assert!(matches!(result, Err(ExtractionError::InvalidArchive(_))));
    }

    #[test]
    fn test_missing_entry_not_found() {
        let data = ZipTestBuilder::new().add_file("a.txt", b"a").build();
        let ns = ZipNamespace::new(Cursor::new(data), None).unwrap();
        let err = ns.open(&path("b.txt")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    fn large_payload() -> Vec<u8> {
        (0..300_000u32).map(|i| (i.wrapping_mul(31) % 251) as u8).collect()
    }

    #[test]
    fn test_large_entries_stream_intact() {
        let payload = large_payload();
        let data = ZipTestBuilder::new()
            .add_file("stored.bin", &payload)
            .add_deflated_file("deflated.bin", &payload)
            .build();
        let ns = ZipNamespace::new(Cursor::new(data), None).unwrap();

        for name in ["stored.bin", "deflated.bin"] {
            let mut out = Vec::new();
            ns.open(&path(name)).unwrap().read_to_end(&mut out).unwrap();
            assert_eq!(out.len(), payload.len(), "{name}");
            assert!(out == payload, "{name} content differs");
        }
    }

    #[test]
    fn test_mirror_large_deflated_entry() {
        use crate::ExtractConfig;
        use crate::NoopProgress;
        use crate::mirror_into;

        let payload = large_payload();
        let data = ZipTestBuilder::new()
            .add_deflated_file("video/intro.bin", &payload)
            .build();
        let ns = ZipNamespace::new(Cursor::new(data), None).unwrap();
        let temp = tempfile::TempDir::new().unwrap();

        let report =
            mirror_into(&ns, temp.path(), &ExtractConfig::default(), &mut NoopProgress).unwrap();

        assert_eq!(report.bytes_written, payload.len() as u64);
        assert!(std::fs::read(temp.path().join("video/intro.bin")).unwrap() == payload);
    }

    #[test]
    fn test_corrupted_entry_fails_crc() {
        let marker = b"checksummed asset payload";
        let mut data = ZipTestBuilder::new().add_file("a.txt", marker).build();
        let offset = data
            .windows(marker.len())
            .position(|w| w == marker)
            .unwrap();
        data[offset] ^= 0xFF;
        let ns = ZipNamespace::new(Cursor::new(data), None).unwrap();

        let mut out = Vec::new();
        let err = ns
            .open(&path("a.txt"))
            .unwrap()
            .read_to_end(&mut out)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_second_open_while_first_alive_fails() {
        let data = ZipTestBuilder::new()
            .add_file("a.txt", b"a")
            .add_file("b.txt", b"b")
            .build();
        let ns = ZipNamespace::new(Cursor::new(data), None).unwrap();

        let first = ns.open(&path("a.txt")).unwrap();
        assert!(ns.open(&path("b.txt")).is_err());
        drop(first);
        assert_eq!(read_all(&ns, "b.txt"), "b");
    }
}
