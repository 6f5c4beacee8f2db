//! Plan execution
//!
//! Applies an already ordered plan one operation at a time through a
//! [`MoveExecutor`]. A later reorder may anchor on a page that an earlier
//! parent-change just moved, so operations are never run concurrently and the
//! plan is never re-sorted here.
//!
//! A failing operation does not stop the batch; every operation gets an entry
//! in the [`ExecutionReport`]. Partial application is a reported outcome, not an
//! error.

use crate::models::{ExecutionItem, ExecutionReport, MoveOperation};
use crate::operations::executor::MoveExecutor;
use crate::operations::TreeOperationError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const DRY_RUN_MESSAGE: &str = "Dry-run: operation not executed.";
const CANCELLED_MESSAGE: &str = "Commit cancelled before execution.";

/// Cooperative cancellation checked between operations.
///
/// Clones share the same flag, so one clone can be handed to the commit and
/// another kept by whoever may cancel it.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Options for [`commit_move_plan`].
#[derive(Debug, Clone, Default)]
pub struct CommitOptions {
    /// Report every operation as skipped without calling the executor
    pub dry_run: bool,
    /// Stop before the next operation once set
    pub cancellation: Option<CancellationFlag>,
}

impl CommitOptions {
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            cancellation: None,
        }
    }

    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationFlag::is_cancelled)
    }
}

/// Reject plans with entries no executor could act on.
///
/// Runs before any operation executes, so a malformed plan never applies
/// partially.
pub fn check_plan_well_formed(plan: &[MoveOperation]) -> Result<(), TreeOperationError> {
    for (index, op) in plan.iter().enumerate() {
        if op.page_id.trim().is_empty() {
            return Err(TreeOperationError::malformed_plan(index, "empty pageId"));
        }
        if op.placement.reference_page_id.trim().is_empty() {
            return Err(TreeOperationError::malformed_plan(
                index,
                format!("empty placement reference for page {}", op.page_id),
            ));
        }
    }
    Ok(())
}

/// Execute `plan` in the given order and report per-operation outcomes.
///
/// # Errors
///
/// Only a malformed plan fails the call, and it does so before any executor
/// call. Executor failures are recorded as `failed` items.
pub async fn commit_move_plan<E>(
    plan: &[MoveOperation],
    executor: &E,
    options: &CommitOptions,
) -> Result<ExecutionReport, TreeOperationError>
where
    E: MoveExecutor + ?Sized,
{
    check_plan_well_formed(plan)?;

    if options.dry_run {
        tracing::info!("Dry-run commit of {} operation(s)", plan.len());
        let items = plan
            .iter()
            .map(|op| ExecutionItem::skipped(&op.page_id, DRY_RUN_MESSAGE))
            .collect();
        return Ok(ExecutionReport::from_items(items));
    }

    let mut items = Vec::with_capacity(plan.len());
    for op in plan {
        if options.is_cancelled() {
            items.push(ExecutionItem::skipped(&op.page_id, CANCELLED_MESSAGE));
            continue;
        }

        match executor.move_page(op).await {
            Ok(()) => {
                tracing::debug!(
                    "Moved page '{}' ({}, {} {})",
                    op.page_id,
                    op.reason.as_str(),
                    op.placement.mode.api_position(),
                    op.placement.reference_page_id
                );
                items.push(ExecutionItem::success(&op.page_id));
            }
            Err(failure) => {
                let retryable = failure.is_retryable();
                tracing::warn!(
                    "Move of page '{}' failed (retryable: {}): {}",
                    op.page_id,
                    retryable,
                    failure
                );
                items.push(ExecutionItem::failed(&op.page_id, failure.message, retryable));
            }
        }
    }

    let report = ExecutionReport::from_items(items);
    tracing::info!(
        "Commit finished: {}/{} succeeded, {} failed, {} skipped",
        report.succeeded,
        report.total,
        report.failed,
        report.skipped
    );
    Ok(report)
}

#[cfg(test)]
#[path = "commit_test.rs"]
mod commit_test;
