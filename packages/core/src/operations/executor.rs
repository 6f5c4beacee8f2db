//! Move executor seam
//!
//! The engine never talks to the backend. Committing a plan goes through a
//! [`MoveExecutor`] supplied by the caller, typically a remote content API
//! adapter that turns a [`PlacementRef`](crate::models::PlacementRef) into its
//! own relative move call.

use crate::models::MoveOperation;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Status codes embedded in a failure message that mark it as transient
const RETRYABLE_STATUS_PATTERN: &str = r"429|5\d\d";

static RETRYABLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(RETRYABLE_STATUS_PATTERN).unwrap());

/// A single move that the backend refused or could not complete.
///
/// Only the message crosses this boundary; retryability is derived from it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct MoveFailure {
    pub message: String,
}

impl MoveFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// True for rate-limit and server-error failures.
    pub fn is_retryable(&self) -> bool {
        is_retryable_failure(&self.message)
    }
}

/// Classify a failure message: a `429` or any `5xx` status anywhere in it.
pub fn is_retryable_failure(message: &str) -> bool {
    RETRYABLE_REGEX.is_match(message)
}

/// Capability that physically applies one move.
///
/// Implementations should already translate the placement into the backend's
/// `append` / `before` / `after` primitive. Transient HTTP failures may be
/// retried internally or by wrapping the executor in
/// [`RetryingExecutor`](crate::operations::RetryingExecutor).
#[async_trait]
pub trait MoveExecutor: Send + Sync {
    async fn move_page(&self, operation: &MoveOperation) -> Result<(), MoveFailure>;
}

#[async_trait]
impl<T: MoveExecutor + ?Sized> MoveExecutor for std::sync::Arc<T> {
    async fn move_page(&self, operation: &MoveOperation) -> Result<(), MoveFailure> {
        (**self).move_page(operation).await
    }
}
