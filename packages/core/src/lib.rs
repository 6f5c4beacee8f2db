//! PageTree Core Restructuring Engine
//!
//! This crate turns an edited copy of a page hierarchy into an ordered list of
//! move operations, validates arbitrary move plans against the loaded tree, and
//! executes plans one move at a time through a pluggable executor.
//!
//! # Architecture
//!
//! - **Owned trees**: every node exclusively owns its children; edits work on a deep copy
//! - **Physical shape is authoritative**: cached `parent_id`/`position` are rewritten after every mutation
//! - **Findings as data**: validation returns every problem found instead of failing fast
//! - **Executor seam**: the remote move call is an async trait, so the engine has no transport dependency
//!
//! # Modules
//!
//! - [`models`] - Data structures (PageNode, MoveOperation, ValidationError, ExecutionReport)
//! - [`tree`] - Pure reconciliation algorithms (index, placement, plan, validate, mutate)
//! - [`operations`] - Plan execution, executor trait and retry wrapper
//! - [`services`] - Boundary services (RestructureService, SessionStore)
//! - [`config`] - Engine settings and environment overrides
//! - [`utils`] - Page URL parsing

pub mod config;
pub mod models;
pub mod operations;
pub mod services;
pub mod tree;
pub mod utils;

// Re-export commonly used types
pub use config::EngineConfig;
pub use models::*;
pub use operations::{
    commit_move_plan, CancellationFlag, CommitOptions, MoveExecutor, MoveFailure,
    RetryingExecutor, TreeOperationError,
};
pub use services::*;
pub use tree::{
    apply_drag_drop, compute_move_plan, order_plan, validate_plan_against_tree,
    DragDropRejection, DropPosition,
};
