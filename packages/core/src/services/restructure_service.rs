//! Restructure Service
//!
//! Boundary facade over the tree engine. Request handlers (HTTP, IPC, CLI) call
//! this service instead of the engine functions so that the same guards apply
//! everywhere:
//!
//! - loaded trees are admitted only if they are small enough, single-space,
//!   duplicate-free and acyclic
//! - plans come back with operator-facing warnings
//! - commits are validated against the loaded tree and re-ordered
//!   (parent-changes first) before any executor call

use crate::config::EngineConfig;
use crate::models::{ExecutionReport, MoveOperation, PageNode, TreeSnapshot, ValidationError};
use crate::operations::{commit_move_plan, CommitOptions, MoveExecutor};
use crate::services::error::RestructureError;
use crate::tree::{
    apply_drag_drop, compute_move_plan, find_duplicate_ids, has_cycle, order_plan,
    validate_plan_against_tree, walk_tree, DropPosition,
};
use serde::{Deserialize, Serialize};

pub const NO_CHANGES_WARNING: &str = "No changes detected.";

/// Computed plan plus operator-facing warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub plan: Vec<MoveOperation>,
    pub warnings: Vec<String>,
}

/// Validation outcome; `ok` is true exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub ok: bool,
    pub errors: Vec<ValidationError>,
}

/// Facade applying admission, validation and ordering guards around the engine
#[derive(Debug, Clone)]
pub struct RestructureService {
    config: EngineConfig,
}

impl RestructureService {
    /// Create a service, rejecting invalid configuration.
    pub fn new(config: EngineConfig) -> Result<Self, RestructureError> {
        config.validate().map_err(RestructureError::invalid_config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Admit a freshly loaded tree as the editing baseline.
    ///
    /// Returns a snapshot of a normalized copy; the cached `parent_id` and
    /// `position` fields of the input are not trusted.
    pub fn admit_tree(&self, tree: &PageNode) -> Result<TreeSnapshot, RestructureError> {
        let page_count = tree.node_count();
        if page_count > self.config.max_pages {
            return Err(RestructureError::tree_rejected(format!(
                "Tree has more than {} pages. Narrow your root page.",
                self.config.max_pages
            )));
        }

        let duplicates = find_duplicate_ids(tree);
        if !duplicates.is_empty() {
            return Err(RestructureError::tree_rejected(format!(
                "Duplicate page ids in tree: {}",
                duplicates.join(", ")
            )));
        }

        if has_cycle(tree) {
            return Err(RestructureError::tree_rejected("Tree contains a cycle."));
        }

        let mut single_space = true;
        walk_tree(tree, |node, _, _| {
            if node.space_key != tree.space_key {
                single_space = false;
            }
        });
        if !single_space {
            return Err(RestructureError::tree_rejected(
                "Cross-space trees are not supported.",
            ));
        }

        let mut normalized = tree.clone();
        normalized.normalize();

        tracing::info!(
            "Admitted tree rooted at '{}' ({} pages, space {})",
            normalized.id,
            page_count,
            normalized.space_key
        );
        Ok(TreeSnapshot::from_tree(normalized))
    }

    /// Apply one drag-and-drop edit to the draft.
    pub fn drag_drop(
        &self,
        draft: &PageNode,
        dragged_id: &str,
        target_id: &str,
        position: DropPosition,
    ) -> Result<PageNode, RestructureError> {
        Ok(apply_drag_drop(draft, dragged_id, target_id, position)?)
    }

    /// Compute the move plan from `original` to `draft`.
    pub fn plan(&self, original: &PageNode, draft: &PageNode) -> Result<PlanResponse, RestructureError> {
        let plan = compute_move_plan(original, draft)?;
        let warnings = if plan.is_empty() {
            vec![NO_CHANGES_WARNING.to_string()]
        } else {
            Vec::new()
        };

        tracing::debug!("Computed plan with {} operation(s)", plan.len());
        Ok(PlanResponse { plan, warnings })
    }

    /// Validate an arbitrary plan against the loaded tree.
    pub fn validate(&self, tree: &PageNode, plan: &[MoveOperation]) -> ValidateResponse {
        let errors = validate_plan_against_tree(tree, plan);
        ValidateResponse {
            ok: errors.is_empty(),
            errors,
        }
    }

    /// Validate, order and execute a plan.
    ///
    /// # Errors
    ///
    /// - `PlanRejected` if validation reports any finding (dry runs included)
    /// - `TreeOperation` if the plan is malformed
    ///
    /// Per-operation failures are part of the returned report.
    pub async fn commit<E>(
        &self,
        tree: &PageNode,
        plan: &[MoveOperation],
        executor: &E,
        options: &CommitOptions,
    ) -> Result<ExecutionReport, RestructureError>
    where
        E: MoveExecutor + ?Sized,
    {
        let errors = validate_plan_against_tree(tree, plan);
        if !errors.is_empty() {
            tracing::warn!(
                "Refusing to commit plan with {} validation finding(s)",
                errors.len()
            );
            return Err(RestructureError::plan_rejected(errors));
        }

        let ordered = order_plan(plan);
        Ok(commit_move_plan(&ordered, executor, options).await?)
    }
}

impl Default for RestructureService {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }
}

#[cfg(test)]
#[path = "restructure_service_test.rs"]
mod restructure_service_test;
