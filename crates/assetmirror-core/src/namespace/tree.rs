//! In-memory node index shared by the memory, zip and tar namespaces.

use std::collections::HashMap;

use crate::AssetPath;
use crate::ExtractionError;
use crate::NodeKind;
use crate::Result;

#[derive(Debug, Clone)]
pub enum Node<L> {
    Leaf(L),
    /// Child names in insertion order.
    Directory(Vec<String>),
}

/// Path-keyed tree with implied parent directories.
///
/// The root always exists as a directory. Re-inserting a leaf replaces its
/// payload but keeps its position among its siblings.
#[derive(Debug, Clone)]
pub struct NodeTree<L> {
    nodes: HashMap<AssetPath, Node<L>>,
}

impl<L> NodeTree<L> {
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(AssetPath::root(), Node::Directory(Vec::new()));
        Self { nodes }
    }

    pub fn ensure_dir(&mut self, path: &AssetPath) -> Result<()> {
        match self.nodes.get(path) {
            Some(Node::Directory(_)) => return Ok(()),
            Some(Node::Leaf(_)) => return Err(conflict(path, "file used as a directory")),
            None => {}
        }

        self.attach_to_parent(path)?;
        self.nodes.insert(path.clone(), Node::Directory(Vec::new()));
        Ok(())
    }

    pub fn insert_leaf(&mut self, path: &AssetPath, leaf: L) -> Result<()> {
        match self.nodes.get_mut(path) {
            Some(Node::Directory(_)) => Err(conflict(path, "directory used as a file")),
            Some(Node::Leaf(existing)) => {
                *existing = leaf;
                Ok(())
            }
            None => {
                if path.is_root() {
                    return Err(conflict(path, "root cannot be a file"));
                }
                self.attach_to_parent(path)?;
                self.nodes.insert(path.clone(), Node::Leaf(leaf));
                Ok(())
            }
        }
    }

    pub fn get(&self, path: &AssetPath) -> Option<&Node<L>> {
        self.nodes.get(path)
    }

    pub fn children(&self, path: &AssetPath) -> Vec<String> {
        match self.nodes.get(path) {
            Some(Node::Directory(children)) => children.clone(),
            _ => Vec::new(),
        }
    }

    pub fn kind(&self, path: &AssetPath) -> Option<NodeKind> {
        self.nodes.get(path).map(|node| match node {
            Node::Leaf(_) => NodeKind::File,
            Node::Directory(_) => NodeKind::Directory,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    fn attach_to_parent(&mut self, path: &AssetPath) -> Result<()> {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return Ok(());
        };
        let name = name.to_string();

        self.ensure_dir(&parent)?;
        if let Some(Node::Directory(children)) = self.nodes.get_mut(&parent) {
            children.push(name);
        }
        Ok(())
    }
}

fn conflict(path: &AssetPath, reason: &'static str) -> ExtractionError {
    ExtractionError::InvalidAssetPath {
        path: path.to_string(),
        reason,
    }
}
