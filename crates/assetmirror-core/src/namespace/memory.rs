//! In-memory asset namespace.

use std::io;
use std::io::Cursor;
use std::io::Read;
use std::sync::Arc;

use super::AssetNamespace;
use super::tree::Node;
use super::tree::NodeTree;
use crate::AssetPath;
use crate::NodeKind;
use crate::Result;

/// Asset namespace held entirely in memory.
///
/// Useful for assets embedded in the binary with `include_bytes!`, and as the
/// backing store for formats that can only be read sequentially (see
/// [`TarNamespace`](super::TarNamespace)). Listings preserve insertion order.
///
/// An *opaque* namespace behaves like a platform asset manager: it refuses to
/// classify nodes, so empty directories look exactly like files that cannot
/// be opened.
///
/// # Examples
///
/// ```
/// use assetmirror_core::AssetNamespace;
/// use assetmirror_core::AssetPath;
/// use assetmirror_core::NodeKind;
/// use assetmirror_core::namespace::MemoryNamespace;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let assets = MemoryNamespace::new()
///     .with_file("shaders/basic.vert", "void main() {}")?
///     .with_dir("saves")?;
///
/// let saves = AssetPath::parse("saves")?;
/// assert_eq!(assets.kind(&saves), Some(NodeKind::Directory));
/// assert!(assets.opaque().kind(&saves).is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryNamespace {
    tree: NodeTree<Arc<[u8]>>,
    opaque: bool,
}

impl MemoryNamespace {
    /// Creates an empty namespace (only the root exists).
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: NodeTree::new(),
            opaque: false,
        }
    }

    /// Adds a file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidAssetPath` if the path is invalid or
    /// conflicts with an existing node of the other kind.
    pub fn insert_file(&mut self, path: &str, data: impl Into<Vec<u8>>) -> Result<()> {
        let path = AssetPath::parse(path)?;
        let data: Vec<u8> = data.into();
        self.tree.insert_leaf(&path, Arc::from(data))
    }

    /// Adds a directory (possibly empty), creating parents as needed.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidAssetPath` if the path is invalid or
    /// already names a file.
    pub fn insert_dir(&mut self, path: &str) -> Result<()> {
        let path = AssetPath::parse(path)?;
        self.tree.ensure_dir(&path)
    }

    /// Builder form of [`insert_file`](Self::insert_file).
    pub fn with_file(mut self, path: &str, data: impl Into<Vec<u8>>) -> Result<Self> {
        self.insert_file(path, data)?;
        Ok(self)
    }

    /// Builder form of [`insert_dir`](Self::insert_dir).
    pub fn with_dir(mut self, path: &str) -> Result<Self> {
        self.insert_dir(path)?;
        Ok(self)
    }

    /// Stops reporting node kinds.
    #[must_use]
    pub fn opaque(mut self) -> Self {
        self.opaque = true;
        self
    }

    /// Returns `true` if this namespace does not report node kinds.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.opaque
    }
}

impl Default for MemoryNamespace {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetNamespace for MemoryNamespace {
    fn list(&self, path: &AssetPath) -> io::Result<Vec<String>> {
        Ok(self.tree.children(path))
    }

    fn open(&self, path: &AssetPath) -> io::Result<Box<dyn Read + '_>> {
        match self.tree.get(path) {
            Some(Node::Leaf(data)) => Ok(Box::new(Cursor::new(&data[..]))),
            Some(Node::Directory(_)) => Err(io::Error::other(format!(
                "asset '{path}' is a directory"
            ))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("asset '{path}' not found"),
            )),
        }
    }

    fn kind(&self, path: &AssetPath) -> Option<NodeKind> {
        if self.opaque {
            None
        } else {
            self.tree.kind(path)
        }
    }
}
