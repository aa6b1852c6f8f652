//! Asset node kind enumeration.

use std::fmt;

/// Kind of a node in an asset namespace.
///
/// Not every namespace can tell files and directories apart: a namespace
/// backed by a platform asset manager only offers "list" and "open". Such
/// namespaces report `None` from
/// [`AssetNamespace::kind`](crate::AssetNamespace::kind) and the extractor
/// falls back to inferring the kind from the listing.
///
/// # Examples
///
/// ```
/// use assetmirror_core::NodeKind;
///
/// assert!(NodeKind::File.is_file());
/// assert!(NodeKind::Directory.is_directory());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Regular file with readable content.
    File,

    /// Directory, possibly empty.
    Directory,
}

impl NodeKind {
    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Directory => f.write_str("directory"),
        }
    }
}
