//! Plan Validation Findings
//!
//! Validation findings are data, not errors: the validator always returns a
//! list and callers decide whether a non-empty list blocks a commit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, machine-readable finding codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorCode {
    DuplicatePage,
    SelfParent,
    MissingPage,
    CrossSpace,
    CycleDetected,
    RootMoveForbidden,
}

impl ValidationErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorCode::DuplicatePage => "DUPLICATE_PAGE",
            ValidationErrorCode::SelfParent => "SELF_PARENT",
            ValidationErrorCode::MissingPage => "MISSING_PAGE",
            ValidationErrorCode::CrossSpace => "CROSS_SPACE",
            ValidationErrorCode::CycleDetected => "CYCLE_DETECTED",
            ValidationErrorCode::RootMoveForbidden => "ROOT_MOVE_FORBIDDEN",
        }
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single structural finding against one page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub code: ValidationErrorCode,
    pub page_id: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(code: ValidationErrorCode, page_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            page_id: page_id.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
