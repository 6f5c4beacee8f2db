//! Plan Execution
//!
//! This module applies validated move plans through an external executor:
//!
//! - `MoveExecutor` - async capability that performs one move on the backend
//! - `commit_move_plan` - sequential, failure-tolerant plan execution
//! - `RetryingExecutor` - exponential-backoff retries for transient failures
//! - `TreeOperationError` - precondition failures shared with the tree engine

pub mod commit;
pub mod error;
pub mod executor;
pub mod retry;

pub use commit::{check_plan_well_formed, commit_move_plan, CancellationFlag, CommitOptions};
pub use error::TreeOperationError;
pub use executor::{is_retryable_failure, MoveExecutor, MoveFailure};
pub use retry::RetryingExecutor;
