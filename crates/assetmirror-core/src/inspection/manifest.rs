//! Asset manifest types.

use crate::AssetPath;
use crate::NodeKind;

/// A node found while walking a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Path of the node inside the namespace.
    pub path: AssetPath,

    /// Node kind. Nodes with children are always directories; childless
    /// nodes are `None` when the namespace cannot classify them.
    pub kind: Option<NodeKind>,
}

impl ManifestEntry {
    /// Returns the depth of the entry below the namespace root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.depth()
    }
}

/// Every node reachable from a starting node, in walk order.
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    /// Node the walk started from.
    pub root: AssetPath,

    /// Entries in depth-first walk order, parents before children.
    pub entries: Vec<ManifestEntry>,

    /// Nodes that could not be listed or had invalid names.
    pub nodes_failed: usize,
}

impl AssetManifest {
    /// Creates an empty manifest rooted at `root`.
    #[must_use]
    pub fn new(root: AssetPath) -> Self {
        Self {
            root,
            ..Self::default()
        }
    }

    /// Adds an entry.
    pub fn push(&mut self, path: AssetPath, kind: Option<NodeKind>) {
        self.entries.push(ManifestEntry { path, kind });
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of entries known to be files.
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.count(Some(NodeKind::File))
    }

    /// Returns the number of entries known to be directories.
    #[must_use]
    pub fn total_directories(&self) -> usize {
        self.count(Some(NodeKind::Directory))
    }

    /// Returns the number of childless entries of unknown kind.
    #[must_use]
    pub fn total_unknown(&self) -> usize {
        self.count(None)
    }

    fn count(&self, kind: Option<NodeKind>) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}
