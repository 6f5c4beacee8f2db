//! Service Layer Error Types
//!
//! Errors surfaced by the boundary-facing services. Engine preconditions and
//! drag-and-drop rejections are wrapped; validation findings that block a
//! commit are carried as data inside [`RestructureError::PlanRejected`].

use crate::models::ValidationError;
use crate::operations::TreeOperationError;
use crate::tree::DragDropRejection;
use thiserror::Error;

/// Service operation errors
#[derive(Error, Debug)]
pub enum RestructureError {
    /// Draft not derived from original, or malformed plan
    #[error("Tree operation failed: {0}")]
    TreeOperation(#[from] TreeOperationError),

    /// Drag-and-drop edit refused
    #[error("Move rejected: {0}")]
    DragDropRejected(#[from] DragDropRejection),

    /// Plan has validation findings and must not be committed
    #[error("Plan validation failed with {} finding(s)", .errors.len())]
    PlanRejected { errors: Vec<ValidationError> },

    /// Loaded tree fails admission checks
    #[error("Tree rejected: {0}")]
    TreeRejected(String),

    /// Unknown session id
    #[error("Session not found. Please reconnect.")]
    SessionNotFound { session_id: String },

    /// Session older than its time-to-live
    #[error("Session expired. Please reconnect.")]
    SessionExpired { session_id: String },

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RestructureError {
    /// Create a plan rejected error
    pub fn plan_rejected(errors: Vec<ValidationError>) -> Self {
        Self::PlanRejected { errors }
    }

    /// Create a tree rejected error
    pub fn tree_rejected(msg: impl Into<String>) -> Self {
        Self::TreeRejected(msg.into())
    }

    /// Create a session not found error
    pub fn session_not_found(session_id: impl Into<String>) -> Self {
        Self::SessionNotFound {
            session_id: session_id.into(),
        }
    }

    /// Create a session expired error
    pub fn session_expired(session_id: impl Into<String>) -> Self {
        Self::SessionExpired {
            session_id: session_id.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Validation findings carried by a rejected plan, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::PlanRejected { errors } => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationErrorCode;

    #[test]
    fn test_plan_rejected_message_counts_findings() {
        let err = RestructureError::plan_rejected(vec![
            ValidationError::new(ValidationErrorCode::CycleDetected, "b", "Cycle detected around page b."),
            ValidationError::new(ValidationErrorCode::CycleDetected, "c", "Cycle detected around page c."),
        ]);
        assert_eq!(err.to_string(), "Plan validation failed with 2 finding(s)");
        assert_eq!(err.validation_errors().len(), 2);
    }

    #[test]
    fn test_wrapped_errors_keep_their_message() {
        let err: RestructureError = TreeOperationError::missing_from_draft("x").into();
        assert_eq!(
            err.to_string(),
            "Tree operation failed: Page 'x' does not exist in draft tree"
        );

        let err: RestructureError = DragDropRejection::RootImmovable.into();
        assert_eq!(err.to_string(), "Move rejected: Root page cannot be moved.");
        assert!(err.validation_errors().is_empty());
    }

    #[test]
    fn test_session_errors() {
        assert_eq!(
            RestructureError::session_expired("s-1").to_string(),
            "Session expired. Please reconnect."
        );
        assert!(matches!(
            RestructureError::session_not_found("s-2"),
            RestructureError::SessionNotFound { .. }
        ));
    }
}
