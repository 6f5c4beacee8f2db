//! Tree Indexing
//!
//! A single pre-order walk produces a lookup from page id to the page, its
//! physical parent and its physical sibling index. Every other tree component
//! reads trees through this index rather than the cached `parent_id` /
//! `position` fields.

use crate::models::PageNode;
use std::collections::{HashMap, HashSet};

/// Location of one page inside an indexed tree.
#[derive(Debug, Clone, Copy)]
pub struct IndexEntry<'a> {
    pub node: &'a PageNode,
    /// Physical parent id (the root reports its own cached `parent_id`)
    pub parent_id: Option<&'a str>,
    /// Position inside the parent's `children` at walk time
    pub sibling_index: usize,
}

/// Pre-order index of a tree, keyed by page id.
///
/// Iteration follows walk order. If an id occurs twice the later entry wins but
/// keeps the slot of the first occurrence.
#[derive(Debug, Default)]
pub struct NodeIndex<'a> {
    entries: Vec<IndexEntry<'a>>,
    slots: HashMap<&'a str, usize>,
}

impl<'a> NodeIndex<'a> {
    fn insert(&mut self, entry: IndexEntry<'a>) {
        let existing = self.slots.get(entry.node.id.as_str()).copied();
        match existing {
            Some(slot) => self.entries[slot] = entry,
            None => {
                self.slots.insert(entry.node.id.as_str(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&IndexEntry<'a>> {
        self.slots.get(id).map(|&slot| &self.entries[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry<'a>> {
        self.entries.iter()
    }

    /// Page ids in pre-order.
    pub fn ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|entry| entry.node.id.as_str())
    }
}

/// Visit every node in pre-order with its physical parent id and sibling index.
pub fn walk_tree<'a, F>(root: &'a PageNode, mut visit: F)
where
    F: FnMut(&'a PageNode, Option<&'a str>, usize),
{
    fn traverse<'a, F>(node: &'a PageNode, parent_id: Option<&'a str>, index: usize, visit: &mut F)
    where
        F: FnMut(&'a PageNode, Option<&'a str>, usize),
    {
        visit(node, parent_id, index);
        for (child_index, child) in node.children.iter().enumerate() {
            traverse(child, Some(node.id.as_str()), child_index, visit);
        }
    }

    traverse(root, root.parent_id.as_deref(), 0, &mut visit);
}

/// Build the id lookup for `root` in one pass.
pub fn build_node_index(root: &PageNode) -> NodeIndex<'_> {
    let mut index = NodeIndex::default();
    walk_tree(root, |node, parent_id, sibling_index| {
        index.insert(IndexEntry {
            node,
            parent_id,
            sibling_index,
        });
    });
    index
}

/// Detect a cycle over physical children edges (three-color DFS keyed by id).
///
/// An id reappearing below itself counts as a cycle; the same id in two
/// unrelated branches does not (see [`find_duplicate_ids`] for that).
pub fn has_cycle(root: &PageNode) -> bool {
    fn dfs<'a>(node: &'a PageNode, visiting: &mut HashSet<&'a str>, visited: &mut HashSet<&'a str>) -> bool {
        let id = node.id.as_str();
        if visiting.contains(id) {
            return true;
        }
        if visited.contains(id) {
            return false;
        }

        visiting.insert(id);
        for child in &node.children {
            if dfs(child, visiting, visited) {
                return true;
            }
        }
        visiting.remove(id);
        visited.insert(id);
        false
    }

    dfs(root, &mut HashSet::new(), &mut HashSet::new())
}

/// Ids that occur more than once in the tree, in order of their second occurrence.
pub fn find_duplicate_ids(root: &PageNode) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    walk_tree(root, |node, _, _| {
        if !seen.insert(node.id.as_str()) && !duplicates.contains(&node.id) {
            duplicates.push(node.id.clone());
        }
    });
    duplicates
}
