//! Test utilities for building packages and faulty namespaces.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashSet;
use std::io;
use std::io::Cursor;
use std::io::Read;
use std::io::Write;

use crate::AssetNamespace;
use crate::AssetPath;
use crate::NodeKind;

/// Builder for in-memory ZIP packages.
pub struct ZipTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(0o644);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    #[must_use]
    pub fn add_deflated_file(mut self, path: &str, data: &[u8]) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .unix_permissions(0o644);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

/// Builder for in-memory TAR bundles.
pub struct TarTestBuilder {
    builder: tar::Builder<Vec<u8>>,
}

impl TarTestBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        self.builder.append_data(&mut header, path, data).unwrap();
        self
    }

    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o755);
        header.set_entry_type(tar::EntryType::Directory);
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o777);
        header.set_entry_type(tar::EntryType::Symlink);
        header.set_link_name(target).unwrap();
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Appends an entry whose header name is written verbatim, the way
    /// `tar -C dir .` stores `./`-prefixed names.
    #[must_use]
    pub fn add_raw_entry(mut self, name: &str, entry_type: tar::EntryType, data: &[u8]) -> Self {
        let mut header = tar::Header::new_gnu();
        let raw = name.as_bytes();
        header.as_gnu_mut().unwrap().name[..raw.len()].copy_from_slice(raw);
        header.set_size(data.len() as u64);
        header.set_mode(if entry_type.is_dir() { 0o755 } else { 0o644 });
        header.set_entry_type(entry_type);
        header.set_cksum();
        self.builder.append(&header, data).unwrap();
        self
    }

    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.builder.into_inner().unwrap()
    }

    #[must_use]
    pub fn build_gz(self) -> Vec<u8> {
        use flate2::Compression;
        use flate2::write::GzEncoder;

        let tar = self.build();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(&tar).unwrap();
        encoder.finish().unwrap()
    }
}

/// Wraps a namespace and injects failures at chosen paths.
pub struct FaultyNamespace<N> {
    inner: N,
    failing_lists: HashSet<String>,
    failing_opens: HashSet<String>,
}

impl<N: AssetNamespace> FaultyNamespace<N> {
    pub fn new(inner: N) -> Self {
        Self {
            inner,
            failing_lists: HashSet::new(),
            failing_opens: HashSet::new(),
        }
    }

    #[must_use]
    pub fn fail_list(mut self, path: &str) -> Self {
        self.failing_lists.insert(path.to_string());
        self
    }

    #[must_use]
    pub fn fail_open(mut self, path: &str) -> Self {
        self.failing_opens.insert(path.to_string());
        self
    }
}

impl<N: AssetNamespace> AssetNamespace for FaultyNamespace<N> {
    fn list(&self, path: &AssetPath) -> io::Result<Vec<String>> {
        if self.failing_lists.contains(path.as_str()) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "list denied"));
        }
        self.inner.list(path)
    }

    fn open(&self, path: &AssetPath) -> io::Result<Box<dyn Read + '_>> {
        if self.failing_opens.contains(path.as_str()) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "open denied"));
        }
        self.inner.open(path)
    }

    fn kind(&self, path: &AssetPath) -> Option<NodeKind> {
        self.inner.kind(path)
    }
}

/// Namespace whose listing reports names that must never be written.
pub struct HostileNamespace;

impl AssetNamespace for HostileNamespace {
    fn list(&self, path: &AssetPath) -> io::Result<Vec<String>> {
        if path.is_root() {
            Ok(vec![
                "..".to_string(),
                "a/b".to_string(),
                String::new(),
                "ok.txt".to_string(),
            ])
        } else {
            Ok(Vec::new())
        }
    }

    fn open(&self, path: &AssetPath) -> io::Result<Box<dyn Read + '_>> {
        if path.as_str() == "ok.txt" {
            Ok(Box::new(Cursor::new(b"fine".to_vec())))
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "nope"))
        }
    }
}
