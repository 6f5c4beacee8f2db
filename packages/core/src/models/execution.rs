//! Commit Execution Report
//!
//! Items are appended in plan order while a commit runs and never modified
//! afterwards; the aggregate counts are derived once at the end.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Success,
    Failed,
    Skipped,
}

/// Outcome of one move operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionItem {
    pub page_id: String,
    pub status: ExecutionStatus,
    pub message: String,
    /// True when the failure looks transient (rate limit or server error)
    pub retryable: bool,
}

impl ExecutionItem {
    pub fn success(page_id: impl Into<String>) -> Self {
        let page_id = page_id.into();
        Self {
            message: format!("Moved page {}.", page_id),
            page_id,
            status: ExecutionStatus::Success,
            retryable: false,
        }
    }

    pub fn failed(page_id: impl Into<String>, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            page_id: page_id.into(),
            status: ExecutionStatus::Failed,
            message: message.into(),
            retryable,
        }
    }

    pub fn skipped(page_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            status: ExecutionStatus::Skipped,
            message: message.into(),
            retryable: false,
        }
    }
}

/// Aggregate result of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    #[serde(default)]
    pub skipped: usize,
    pub items: Vec<ExecutionItem>,
}

impl ExecutionReport {
    pub fn from_items(items: Vec<ExecutionItem>) -> Self {
        let count = |status: ExecutionStatus| items.iter().filter(|item| item.status == status).count();
        Self {
            total: items.len(),
            succeeded: count(ExecutionStatus::Success),
            failed: count(ExecutionStatus::Failed),
            skipped: count(ExecutionStatus::Skipped),
            items,
        }
    }

    /// True when every item executed successfully.
    pub fn is_complete(&self) -> bool {
        self.succeeded == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_items_counts() {
        let report = ExecutionReport::from_items(vec![
            ExecutionItem::success("a"),
            ExecutionItem::failed("b", "Move failed (b): 503", true),
            ExecutionItem::skipped("c", "Dry-run: operation not executed."),
        ]);

        assert_eq!(report.total, 3);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 1);
        assert!(!report.is_complete());
        assert_eq!(report.items[0].message, "Moved page a.");
    }

    #[test]
    fn test_empty_report_is_complete() {
        let report = ExecutionReport::from_items(Vec::new());
        assert_eq!(report.total, 0);
        assert!(report.is_complete());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&ExecutionStatus::Skipped).unwrap();
        assert_eq!(json, "\"skipped\"");
    }

    #[test]
    fn test_report_without_skipped_count_deserializes() {
        let json = r#"{
            "total": 1,
            "succeeded": 1,
            "failed": 0,
            "items": [
                {"pageId": "a", "status": "success", "message": "Moved page a.", "retryable": false}
            ]
        }"#;

        let report: ExecutionReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.skipped, 0);
        assert_eq!(report.succeeded, 1);
        assert!(report.is_complete());
    }
}
