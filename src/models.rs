// src/models.rs

//! Data models shared between the command handlers and the remote client
//! collaborator. The dispatch engine itself does not depend on anything here.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The kind of a remote filesystem node, mirroring the numeric `t` codes of
/// the Mega node records (0 = file, 1 = directory, 2..4 = the special roots).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    File,
    Directory,
    Root,
    Inbox,
    Trash,
}

impl NodeKind {
    /// Whether a node of this kind can contain other nodes.
    pub fn is_container(self) -> bool {
        !matches!(self, Self::File)
    }
}

/// A single node of the remote filesystem, with its absolute path and depth
/// already resolved by the client collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    /// The opaque node handle assigned by the remote service.
    pub handle: String,
    /// The handle of the containing node, if any.
    pub parent: Option<String>,
    /// The decrypted node name.
    pub name: String,
    pub kind: NodeKind,
    /// Absolute path of the node, rooted at `/`.
    pub path: String,
    /// Depth of the node below the root, starting at 0.
    pub level: usize,
}

/// An indexed snapshot of the remote filesystem.
///
/// Tree reconstruction (parent links, paths, depths) happens inside the
/// remote client; this type only indexes the finished nodes by handle and
/// keeps a path-sorted view for deterministic listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileIndex {
    nodes: HashMap<String, FileNode>,
    by_path: BTreeMap<String, String>,
}

impl FileIndex {
    pub fn new(nodes: Vec<FileNode>) -> Self {
        let mut index = Self::default();
        for node in nodes {
            index.by_path.insert(node.path.clone(), node.handle.clone());
            index.nodes.insert(node.handle.clone(), node);
        }
        index
    }

    /// Looks up a node by its handle.
    pub fn get(&self, handle: &str) -> Option<&FileNode> {
        self.nodes.get(handle)
    }

    /// Iterates over all nodes in ascending path order.
    pub fn iter_by_path(&self) -> impl Iterator<Item = &FileNode> {
        self.by_path.values().filter_map(|handle| self.nodes.get(handle))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// MARK: --- UNIT TESTS ---
