//! Page Tree Structures
//!
//! This module defines `PageNode`, the in-memory representation of one page in a
//! loaded hierarchy, and `TreeSnapshot`, the envelope produced by a tree load.
//!
//! # Source of Truth
//!
//! Physical nesting (`children`) is authoritative. The `parent_id` and `position`
//! fields are denormalized caches kept for the wire format; every structural
//! mutation finishes with [`PageNode::normalize`], which rewrites them from the
//! physical shape.
//!
//! # Examples
//!
//! ```rust
//! use pagetree_core::models::PageNode;
//!
//! let tree = PageNode::new("root", "Root", "DOC")
//!     .with_child(PageNode::new("a", "A", "DOC"))
//!     .with_child(PageNode::new("b", "B", "DOC").with_child(PageNode::new("c", "C", "DOC")));
//!
//! assert_eq!(tree.node_count(), 4);
//! assert_eq!(tree.find("c").unwrap().parent_id.as_deref(), Some("b"));
//! ```

use serde::{Deserialize, Serialize};

/// One page in a hierarchy, exclusively owning its children.
///
/// Cloning a `PageNode` is a full deep copy; no subtree is ever shared between
/// two trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNode {
    /// Stable identifier, unique across the whole tree
    pub id: String,

    /// Display title (not significant to any algorithm)
    pub title: String,

    /// Cached parent identifier (None for the root)
    pub parent_id: Option<String>,

    /// Partition tag shared by every node of one tree
    pub space_key: String,

    /// Cached zero-based sibling index
    #[serde(default)]
    pub position: usize,

    /// Ordered children; array order is the sibling order
    #[serde(default)]
    pub children: Vec<PageNode>,
}

impl PageNode {
    /// Create a parentless leaf node.
    pub fn new(id: impl Into<String>, title: impl Into<String>, space_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            parent_id: None,
            space_key: space_key.into(),
            position: 0,
            children: Vec::new(),
        }
    }

    /// Append `child` as the last child, fixing up its cached fields.
    pub fn with_child(mut self, mut child: PageNode) -> Self {
        child.parent_id = Some(self.id.clone());
        child.position = self.children.len();
        self.children.push(child);
        self
    }

    /// Find a node anywhere in this subtree.
    pub fn find(&self, id: &str) -> Option<&PageNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// True if `id` is this node or any of its descendants.
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(PageNode::node_count).sum::<usize>()
    }

    /// Identifiers of the direct children, in sibling order.
    pub fn child_ids(&self) -> Vec<&str> {
        self.children.iter().map(|child| child.id.as_str()).collect()
    }

    /// Rewrite `parent_id` and `position` of every descendant from physical shape.
    ///
    /// The receiver keeps its own `parent_id`; its `position` is left untouched
    /// because a root has no siblings to be ordered against.
    pub fn normalize(&mut self) {
        let parent_id = self.id.clone();
        for (index, child) in self.children.iter_mut().enumerate() {
            child.parent_id = Some(parent_id.clone());
            child.position = index;
            child.normalize();
        }
    }
}

/// Result of loading a hierarchy from the remote backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeSnapshot {
    pub space_key: String,
    pub root_page_id: String,
    pub tree: PageNode,
}

impl TreeSnapshot {
    pub fn from_tree(tree: PageNode) -> Self {
        Self {
            space_key: tree.space_key.clone(),
            root_page_id: tree.id.clone(),
            tree,
        }
    }
}

#[cfg(test)]
#[path = "page_node_test.rs"]
mod page_node_test;
