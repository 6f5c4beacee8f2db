//! Data Models
//!
//! This module contains the data structures exchanged across the engine:
//!
//! - `PageNode` / `TreeSnapshot` - the page hierarchy
//! - `MoveOperation` / `PlacementRef` - plan entries
//! - `ValidationError` - structural findings against a plan
//! - `ExecutionReport` - per-item commit outcomes
//!
//! All types serialize as camelCase JSON to match the boundary wire format.

mod execution;
mod move_operation;
mod page_node;
mod validation;

pub use execution::{ExecutionItem, ExecutionReport, ExecutionStatus};
pub use move_operation::{MoveOperation, MoveReason, PlacementMode, PlacementRef};
pub use page_node::{PageNode, TreeSnapshot};
pub use validation::{ValidationError, ValidationErrorCode};
