//! Move Plan Computation
//!
//! Diffs an original tree against an edited draft and emits the moves that turn
//! one into the other.
//!
//! # Ordering
//!
//! 1. Every `parent-change` move, in original pre-order.
//! 2. Every `reorder` move, sorted by `(to_parent_id, to_index, page_id)`.
//!
//! A page must sit under its new parent before its new siblings are reordered
//! around it, and reorders applied in ascending target order can always anchor
//! on an earlier sibling that is already in place.

use crate::models::{MoveOperation, MoveReason, PageNode};
use crate::operations::TreeOperationError;
use crate::tree::index::build_node_index;
use crate::tree::placement::resolve_placement;
use std::cmp::Ordering;

/// Compute the ordered move plan turning `original` into `draft`.
///
/// # Errors
///
/// Fails when the draft was not derived from the original: differing node
/// counts, an original page missing from the draft, or a moved page without a
/// parent in the draft.
///
/// # Examples
///
/// ```rust
/// use pagetree_core::models::{MoveReason, PageNode};
/// use pagetree_core::tree::compute_move_plan;
///
/// let original = PageNode::new("root", "Root", "DOC")
///     .with_child(PageNode::new("a", "A", "DOC"))
///     .with_child(PageNode::new("b", "B", "DOC"));
/// let draft = PageNode::new("root", "Root", "DOC")
///     .with_child(PageNode::new("b", "B", "DOC"))
///     .with_child(PageNode::new("a", "A", "DOC"));
///
/// let plan = compute_move_plan(&original, &draft).unwrap();
/// assert_eq!(plan.len(), 2);
/// assert_eq!(plan[0].page_id, "b");
/// assert!(plan.iter().all(|op| op.reason == MoveReason::Reorder));
/// ```
pub fn compute_move_plan(
    original: &PageNode,
    draft: &PageNode,
) -> Result<Vec<MoveOperation>, TreeOperationError> {
    let original_index = build_node_index(original);
    let draft_index = build_node_index(draft);

    if original_index.len() != draft_index.len() {
        return Err(TreeOperationError::node_count_mismatch(
            original_index.len(),
            draft_index.len(),
        ));
    }

    let mut parent_moves = Vec::new();
    let mut reorder_moves = Vec::new();

    for before in original_index.iter() {
        let page_id = before.node.id.as_str();
        if page_id == original.id {
            continue;
        }

        let after = draft_index
            .get(page_id)
            .ok_or_else(|| TreeOperationError::missing_from_draft(page_id))?;

        let parent_changed = before.parent_id != after.parent_id;
        let index_changed = before.sibling_index != after.sibling_index;
        if !parent_changed && !index_changed {
            continue;
        }

        let to_parent_id = after
            .parent_id
            .ok_or_else(|| TreeOperationError::missing_target_parent(page_id))?;
        let target_parent = draft_index
            .get(to_parent_id)
            .ok_or_else(|| TreeOperationError::missing_target_parent(page_id))?;

        let siblings = target_parent.node.child_ids();
        let placement = resolve_placement(page_id, to_parent_id, after.sibling_index, &siblings);

        let reason = if parent_changed {
            MoveReason::ParentChange
        } else {
            MoveReason::Reorder
        };

        tracing::debug!(
            "Planned {} for page '{}': {:?}[{}] -> {}[{}]",
            reason.as_str(),
            page_id,
            before.parent_id,
            before.sibling_index,
            to_parent_id,
            after.sibling_index
        );

        let operation = MoveOperation {
            page_id: page_id.to_string(),
            from_parent_id: before.parent_id.map(str::to_string),
            to_parent_id: Some(to_parent_id.to_string()),
            from_index: before.sibling_index,
            to_index: after.sibling_index,
            placement,
            reason,
        };

        match reason {
            MoveReason::ParentChange => parent_moves.push(operation),
            MoveReason::Reorder => reorder_moves.push(operation),
        }
    }

    reorder_moves.sort_by(compare_reorders);
    parent_moves.extend(reorder_moves);
    Ok(parent_moves)
}

/// Order an externally supplied plan for execution: parent-changes first, in
/// their given order, then reorders sorted by `(to_parent_id, to_index, page_id)`
/// so every sibling anchor is already in place when a reorder runs.
pub fn order_plan(plan: &[MoveOperation]) -> Vec<MoveOperation> {
    let (mut ordered, mut reorders): (Vec<_>, Vec<_>) = plan
        .iter()
        .cloned()
        .partition(MoveOperation::is_parent_change);
    reorders.sort_by(compare_reorders);
    ordered.extend(reorders);
    ordered
}

fn compare_reorders(left: &MoveOperation, right: &MoveOperation) -> Ordering {
    let left_parent = left.to_parent_id.as_deref().unwrap_or("");
    let right_parent = right.to_parent_id.as_deref().unwrap_or("");

    left_parent
        .cmp(right_parent)
        .then(left.to_index.cmp(&right.to_index))
        .then_with(|| left.page_id.cmp(&right.page_id))
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod plan_test;
