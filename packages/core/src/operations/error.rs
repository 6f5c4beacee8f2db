//! Error types for tree operations
//!
//! These are precondition failures: the inputs handed to the engine are not
//! related the way the operation requires, so the call cannot produce a
//! meaningful result. Structural findings about a plan are not errors; see
//! [`crate::models::ValidationError`].

use thiserror::Error;

/// Errors that abort a tree operation before it produces any result
///
/// # Examples
///
/// ```rust
/// use pagetree_core::operations::TreeOperationError;
///
/// let err = TreeOperationError::node_count_mismatch(4, 3);
/// assert!(err.is_structural_mismatch());
///
/// let err = TreeOperationError::malformed_plan(0, "empty pageId");
/// assert!(!err.is_structural_mismatch());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeOperationError {
    /// Original and draft do not contain the same number of pages
    ///
    /// The draft was not derived from the given original.
    #[error("Original tree and draft tree have different node counts ({original} vs {draft})")]
    NodeCountMismatch { original: usize, draft: usize },

    /// A page of the original is absent from the draft
    #[error("Page '{page_id}' does not exist in draft tree")]
    MissingFromDraft { page_id: String },

    /// A moved page has no parent to move under in the draft
    #[error("Page '{page_id}' does not have a target parent in draft tree")]
    MissingTargetParent { page_id: String },

    /// A plan entry lacks a field every executor needs
    ///
    /// Raised before any operation of the plan executes.
    #[error("Malformed plan entry at index {index}: {reason}")]
    MalformedPlan { index: usize, reason: String },
}

impl TreeOperationError {
    /// Create a NodeCountMismatch error
    pub fn node_count_mismatch(original: usize, draft: usize) -> Self {
        Self::NodeCountMismatch { original, draft }
    }

    /// Create a MissingFromDraft error
    pub fn missing_from_draft(page_id: impl Into<String>) -> Self {
        Self::MissingFromDraft {
            page_id: page_id.into(),
        }
    }

    /// Create a MissingTargetParent error
    pub fn missing_target_parent(page_id: impl Into<String>) -> Self {
        Self::MissingTargetParent {
            page_id: page_id.into(),
        }
    }

    /// Create a MalformedPlan error
    pub fn malformed_plan(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedPlan {
            index,
            reason: reason.into(),
        }
    }

    /// True for the draft-not-derived-from-original family of failures.
    pub fn is_structural_mismatch(&self) -> bool {
        matches!(
            self,
            Self::NodeCountMismatch { .. }
                | Self::MissingFromDraft { .. }
                | Self::MissingTargetParent { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_count_mismatch_error() {
        let err = TreeOperationError::node_count_mismatch(4, 3);
        assert!(matches!(err, TreeOperationError::NodeCountMismatch { .. }));
        assert_eq!(
            format!("{}", err),
            "Original tree and draft tree have different node counts (4 vs 3)"
        );
    }

    #[test]
    fn test_missing_from_draft_error() {
        let err = TreeOperationError::missing_from_draft("page-1");
        assert!(err.is_structural_mismatch());
        assert_eq!(format!("{}", err), "Page 'page-1' does not exist in draft tree");
    }

    #[test]
    fn test_missing_target_parent_error() {
        let err = TreeOperationError::missing_target_parent("page-2");
        assert!(err.is_structural_mismatch());
        assert_eq!(
            format!("{}", err),
            "Page 'page-2' does not have a target parent in draft tree"
        );
    }

    #[test]
    fn test_malformed_plan_error() {
        let err = TreeOperationError::malformed_plan(3, "empty pageId");
        assert!(!err.is_structural_mismatch());
        assert_eq!(
            format!("{}", err),
            "Malformed plan entry at index 3: empty pageId"
        );
    }
}
