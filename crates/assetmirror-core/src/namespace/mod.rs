//! Read-only asset namespaces.
//!
//! An asset namespace is a hierarchical store addressed by slash-separated
//! [`AssetPath`]s that offers two primitives: list the children of a path,
//! and open a path for reading. Platform asset managers offer nothing more,
//! which is why [`AssetNamespace::kind`] is optional.

use std::io;
use std::io::Read;

use crate::AssetPath;
use crate::NodeKind;

pub mod dir;
pub mod memory;
pub mod package;
pub mod tar;
mod tree;
pub mod zip;

pub use dir::DirNamespace;
pub use memory::MemoryNamespace;
pub use package::open_package;
pub use tar::TarNamespace;
pub use zip::ZipNamespace;

/// A read-only hierarchical asset store.
///
/// # Contract
///
/// - `list` of a file, and of a path that does not exist, returns an empty
///   vector rather than an error. An `Err` means the listing itself failed.
/// - Names returned by `list` are single path segments. The extractor
///   validates them and skips anything that is not.
/// - `open` of a directory fails.
///
/// # Examples
///
/// ```
/// use assetmirror_core::AssetNamespace;
/// use assetmirror_core::AssetPath;
/// use assetmirror_core::namespace::MemoryNamespace;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let assets = MemoryNamespace::new()
///     .with_file("a/b.txt", "x")?
///     .with_file("a/c/d.txt", "y")?;
///
/// assert_eq!(assets.list(&AssetPath::parse("a")?)?, ["b.txt", "c"]);
/// # Ok(())
/// # }
/// ```
pub trait AssetNamespace {
    /// Lists the child names of `path`, in the namespace's own order.
    fn list(&self, path: &AssetPath) -> io::Result<Vec<String>>;

    /// Opens `path` for streamed reading.
    fn open(&self, path: &AssetPath) -> io::Result<Box<dyn Read + '_>>;

    /// Classifies `path`, if the namespace is able to.
    ///
    /// The default reports `None`, which makes the extractor fall back to
    /// treating childless nodes as files and skipping those that fail to
    /// open.
    fn kind(&self, _path: &AssetPath) -> Option<NodeKind> {
        None
    }
}

impl<N: AssetNamespace + ?Sized> AssetNamespace for &N {
    fn list(&self, path: &AssetPath) -> io::Result<Vec<String>> {
        (**self).list(path)
    }

    fn open(&self, path: &AssetPath) -> io::Result<Box<dyn Read + '_>> {
        (**self).open(path)
    }

    fn kind(&self, path: &AssetPath) -> Option<NodeKind> {
        (**self).kind(path)
    }
}

impl<N: AssetNamespace + ?Sized> AssetNamespace for Box<N> {
    fn list(&self, path: &AssetPath) -> io::Result<Vec<String>> {
        (**self).list(path)
    }

    fn open(&self, path: &AssetPath) -> io::Result<Box<dyn Read + '_>> {
        (**self).open(path)
    }

    fn kind(&self, path: &AssetPath) -> Option<NodeKind> {
        (**self).kind(path)
    }
}
