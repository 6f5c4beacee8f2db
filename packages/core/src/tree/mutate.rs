//! Drag-and-Drop Tree Mutation
//!
//! Applies one drag-and-drop edit to a page tree. The input tree is never
//! touched: the edit runs on a deep copy, so a rejected edit cannot leave
//! partial state behind. A successful edit ends with a full renormalization of
//! the cached `parent_id` / `position` fields.

use crate::models::PageNode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Where the dragged page lands relative to the drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    /// Sibling immediately before the target
    Before,
    /// Sibling immediately after the target
    After,
    /// Last child of the target
    Inside,
}

impl fmt::Display for DropPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DropPosition::Before => "before",
            DropPosition::After => "after",
            DropPosition::Inside => "inside",
        })
    }
}

impl FromStr for DropPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(DropPosition::Before),
            "after" => Ok(DropPosition::After),
            "inside" => Ok(DropPosition::Inside),
            other => Err(format!(
                "Unknown drop position '{}' (expected before, after or inside)",
                other
            )),
        }
    }
}

/// Reasons a drag-and-drop edit is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DragDropRejection {
    #[error("Page cannot become its own parent.")]
    SelfParent,

    #[error("Root page cannot be moved.")]
    RootImmovable,

    #[error("Drag node or target node not found: {id}")]
    NodeNotFound { id: String },

    #[error("Cannot move a page into its own subtree.")]
    IntoOwnSubtree,

    /// The root has no siblings to be placed next to
    #[error("Cannot place before/after root.")]
    RootSibling,
}

/// Move `dragged_id` relative to `target_id`, returning the edited copy.
///
/// # Examples
///
/// ```rust
/// use pagetree_core::models::PageNode;
/// use pagetree_core::tree::{apply_drag_drop, DropPosition};
///
/// let tree = PageNode::new("root", "Root", "DOC")
///     .with_child(PageNode::new("a", "A", "DOC"))
///     .with_child(PageNode::new("b", "B", "DOC"));
///
/// let draft = apply_drag_drop(&tree, "a", "b", DropPosition::Inside).unwrap();
/// assert_eq!(draft.find("a").unwrap().parent_id.as_deref(), Some("b"));
/// assert_eq!(tree.find("a").unwrap().parent_id.as_deref(), Some("root"));
/// ```
pub fn apply_drag_drop(
    tree: &PageNode,
    dragged_id: &str,
    target_id: &str,
    position: DropPosition,
) -> Result<PageNode, DragDropRejection> {
    if dragged_id == target_id && position == DropPosition::Inside {
        return Err(DragDropRejection::SelfParent);
    }

    let mut root = tree.clone();
    if root.id == dragged_id {
        return Err(DragDropRejection::RootImmovable);
    }

    let dragged = root
        .find(dragged_id)
        .ok_or_else(|| DragDropRejection::NodeNotFound {
            id: dragged_id.to_string(),
        })?;
    if !root.contains(target_id) {
        return Err(DragDropRejection::NodeNotFound {
            id: target_id.to_string(),
        });
    }

    if dragged.contains(target_id) {
        return Err(DragDropRejection::IntoOwnSubtree);
    }

    if position != DropPosition::Inside && root.id == target_id {
        return Err(DragDropRejection::RootSibling);
    }

    // Every lookup below was checked above
    let node = detach(&mut root, dragged_id).ok_or_else(|| DragDropRejection::NodeNotFound {
        id: dragged_id.to_string(),
    })?;

    match position {
        DropPosition::Inside => {
            let target = find_mut(&mut root, target_id).ok_or_else(|| {
                DragDropRejection::NodeNotFound {
                    id: target_id.to_string(),
                }
            })?;
            target.children.push(node);
        }
        DropPosition::Before | DropPosition::After => {
            let parent = find_parent_mut(&mut root, target_id).ok_or(DragDropRejection::RootSibling)?;
            let target_index = parent
                .children
                .iter()
                .position(|child| child.id == target_id)
                .ok_or(DragDropRejection::RootSibling)?;
            let insert_index = match position {
                DropPosition::Before => target_index,
                _ => (target_index + 1).min(parent.children.len()),
            };
            parent.children.insert(insert_index, node);
        }
    }

    root.normalize();

    tracing::debug!(
        "Dropped page '{}' {} '{}'",
        dragged_id,
        position,
        target_id
    );

    Ok(root)
}

fn find_mut<'a>(node: &'a mut PageNode, id: &str) -> Option<&'a mut PageNode> {
    if node.id == id {
        return Some(node);
    }
    node.children.iter_mut().find_map(|child| find_mut(child, id))
}

fn find_parent_mut<'a>(node: &'a mut PageNode, id: &str) -> Option<&'a mut PageNode> {
    if node.children.iter().any(|child| child.id == id) {
        return Some(node);
    }
    node.children
        .iter_mut()
        .find_map(|child| find_parent_mut(child, id))
}

fn detach(node: &mut PageNode, id: &str) -> Option<PageNode> {
    if let Some(index) = node.children.iter().position(|child| child.id == id) {
        return Some(node.children.remove(index));
    }
    node.children.iter_mut().find_map(|child| detach(child, id))
}

#[cfg(test)]
#[path = "mutate_test.rs"]
mod mutate_test;
