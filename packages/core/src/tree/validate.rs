//! Plan Validation
//!
//! Checks any plan, computed or operator-supplied, against the loaded tree it
//! will be applied to. Nothing produced by [`compute_move_plan`] is assumed:
//! every guarantee is re-derived here.
//!
//! Per-operation checks run in this order and accumulate across operations:
//!
//! 1. duplicate page id (`DUPLICATE_PAGE`, later occurrences are not checked further)
//! 2. moving the root (`ROOT_MOVE_FORBIDDEN`)
//! 3. unknown page (`MISSING_PAGE`)
//! 4. unknown target parent (`MISSING_PAGE`, stops the checks for that operation)
//! 5. page moved under itself (`SELF_PARENT`)
//! 6. page and target parent in different spaces (`CROSS_SPACE`)
//!
//! Then one simulated cycle pass runs over every node (`CYCLE_DETECTED`).
//!
//! [`compute_move_plan`]: crate::tree::compute_move_plan

use crate::models::{MoveOperation, PageNode, ValidationError, ValidationErrorCode};
use crate::tree::index::{build_node_index, NodeIndex};
use std::collections::{HashMap, HashSet};

/// Validate `plan` against `tree`. An empty result means the plan is legal.
///
/// Never fails: structural problems are returned as findings. The output is
/// deduplicated on `(code, page_id, message)` and is deterministic for a given
/// input.
pub fn validate_plan_against_tree(tree: &PageNode, plan: &[MoveOperation]) -> Vec<ValidationError> {
    let index = build_node_index(tree);
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for op in plan {
        if !seen.insert(op.page_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorCode::DuplicatePage,
                &op.page_id,
                format!("Duplicate move operation for page {}.", op.page_id),
            ));
            continue;
        }

        if op.page_id == tree.id {
            errors.push(ValidationError::new(
                ValidationErrorCode::RootMoveForbidden,
                &op.page_id,
                "Root page cannot be moved.",
            ));
        }

        let page = index.get(&op.page_id);
        if page.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorCode::MissingPage,
                &op.page_id,
                format!("Page {} is missing in the loaded tree.", op.page_id),
            ));
        }

        let Some(parent) = op.to_parent_id.as_deref().and_then(|id| index.get(id)) else {
            errors.push(ValidationError::new(
                ValidationErrorCode::MissingPage,
                &op.page_id,
                format!(
                    "Target parent {} does not exist.",
                    op.to_parent_id.as_deref().unwrap_or("null")
                ),
            ));
            continue;
        };

        if op.page_id == parent.node.id {
            errors.push(ValidationError::new(
                ValidationErrorCode::SelfParent,
                &op.page_id,
                "Page cannot be moved under itself.",
            ));
        }

        if let Some(page) = page {
            if page.node.space_key != parent.node.space_key {
                errors.push(ValidationError::new(
                    ValidationErrorCode::CrossSpace,
                    &op.page_id,
                    "Cross-space move is not allowed.",
                ));
            }
        }
    }

    errors.extend(detect_simulated_cycles(&index, plan));

    let errors = dedupe_errors(errors);
    if !errors.is_empty() {
        tracing::debug!(
            "Plan of {} operation(s) has {} validation finding(s)",
            plan.len(),
            errors.len()
        );
    }
    errors
}

/// Cycle check over the parent graph the plan would produce, without
/// materializing that tree.
///
/// The parent map is seeded from the indexed tree and then overwritten by every
/// operation's target parent. Each node's ancestor chain is walked with a path
/// set; a node recurring in its own chain is reported against the node whose
/// walk found it.
pub fn detect_simulated_cycles(index: &NodeIndex<'_>, plan: &[MoveOperation]) -> Vec<ValidationError> {
    let mut order: Vec<&str> = Vec::with_capacity(index.len());
    let mut parents: HashMap<&str, Option<&str>> = HashMap::with_capacity(index.len());

    for entry in index.iter() {
        let id = entry.node.id.as_str();
        if parents.insert(id, entry.parent_id).is_none() {
            order.push(id);
        }
    }
    for op in plan {
        let id = op.page_id.as_str();
        if parents.insert(id, op.to_parent_id.as_deref()).is_none() {
            order.push(id);
        }
    }

    let mut errors = Vec::new();
    for &start in &order {
        let mut path = HashSet::new();
        let mut current = Some(start);

        while let Some(id) = current {
            if !path.insert(id) {
                errors.push(ValidationError::new(
                    ValidationErrorCode::CycleDetected,
                    start,
                    format!("Cycle detected around page {}.", start),
                ));
                break;
            }
            current = parents.get(id).copied().flatten();
        }
    }
    errors
}

fn dedupe_errors(errors: Vec<ValidationError>) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    errors
        .into_iter()
        .filter(|error| seen.insert(error.clone()))
        .collect()
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;
