//! Tests for sequential plan execution

#[cfg(test)]
mod tests {
    use crate::models::{ExecutionStatus, MoveOperation, MoveReason, PlacementRef};
    use crate::operations::{
        commit_move_plan, CancellationFlag, CommitOptions, MoveExecutor, MoveFailure,
        TreeOperationError,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Records every call and fails pages listed in `failures`
    #[derive(Default)]
    struct RecordingExecutor {
        calls: Mutex<Vec<String>>,
        failures: HashMap<String, String>,
        cancel_after_first: Option<CancellationFlag>,
    }

    impl RecordingExecutor {
        fn failing(page_id: &str, message: &str) -> Self {
            let mut failures = HashMap::new();
            failures.insert(page_id.to_string(), message.to_string());
            Self {
                failures,
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MoveExecutor for RecordingExecutor {
        async fn move_page(&self, operation: &MoveOperation) -> Result<(), MoveFailure> {
            self.calls.lock().unwrap().push(operation.page_id.clone());
            if let Some(flag) = &self.cancel_after_first {
                flag.cancel();
            }
            match self.failures.get(&operation.page_id) {
                Some(message) => Err(MoveFailure::new(message.clone())),
                None => Ok(()),
            }
        }
    }

    fn op(page_id: &str, reason: MoveReason) -> MoveOperation {
        MoveOperation {
            page_id: page_id.to_string(),
            from_parent_id: Some("root".to_string()),
            to_parent_id: Some("root".to_string()),
            from_index: 0,
            to_index: 1,
            placement: PlacementRef::after("x"),
            reason,
        }
    }

    fn sample_plan() -> Vec<MoveOperation> {
        vec![
            op("moved", MoveReason::ParentChange),
            op("a", MoveReason::Reorder),
            op("b", MoveReason::Reorder),
        ]
    }

    #[tokio::test]
    async fn test_executes_in_plan_order() {
        let executor = RecordingExecutor::default();
        let report = commit_move_plan(&sample_plan(), &executor, &CommitOptions::default())
            .await
            .unwrap();

        assert_eq!(executor.calls(), vec!["moved", "a", "b"]);
        assert_eq!(report.total, 3);
        assert_eq!(report.succeeded, 3);
        assert_eq!(report.failed, 0);
        assert!(report.is_complete());
    }

    #[tokio::test]
    async fn test_dry_run_never_calls_executor() {
        let executor = RecordingExecutor::default();
        let report = commit_move_plan(&sample_plan(), &executor, &CommitOptions::dry_run())
            .await
            .unwrap();

        assert!(executor.calls().is_empty());
        assert_eq!(report.skipped, 3);
        assert_eq!(report.succeeded, 0);
        assert!(report
            .items
            .iter()
            .all(|item| item.status == ExecutionStatus::Skipped && !item.retryable));
    }

    #[tokio::test]
    async fn test_failure_does_not_halt_batch() {
        let executor = RecordingExecutor::failing("a", "Move failed (a): 404 Not Found");
        let report = commit_move_plan(&sample_plan(), &executor, &CommitOptions::default())
            .await
            .unwrap();

        assert_eq!(executor.calls(), vec!["moved", "a", "b"]);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        let failed = &report.items[1];
        assert_eq!(failed.status, ExecutionStatus::Failed);
        assert_eq!(failed.message, "Move failed (a): 404 Not Found");
        assert!(!failed.retryable);
    }

    #[tokio::test]
    async fn test_server_errors_are_flagged_retryable() {
        let executor = RecordingExecutor::failing("b", "Move failed (b): 503 Service Unavailable");
        let report = commit_move_plan(&sample_plan(), &executor, &CommitOptions::default())
            .await
            .unwrap();

        assert!(report.items[2].retryable);
    }

    #[tokio::test]
    async fn test_cancellation_skips_remaining_operations() {
        let flag = CancellationFlag::new();
        let executor = RecordingExecutor {
            cancel_after_first: Some(flag.clone()),
            ..Default::default()
        };
        let options = CommitOptions::default().with_cancellation(flag);

        let report = commit_move_plan(&sample_plan(), &executor, &options)
            .await
            .unwrap();

        assert_eq!(executor.calls(), vec!["moved"]);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.total, 3);
    }

    #[tokio::test]
    async fn test_malformed_plan_aborts_before_any_call() {
        let executor = RecordingExecutor::default();
        let mut plan = sample_plan();
        plan[2].placement.reference_page_id = String::new();

        let err = commit_move_plan(&plan, &executor, &CommitOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, TreeOperationError::MalformedPlan { index: 2, .. }));
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_accepts_trait_objects() {
        let executor = RecordingExecutor::default();
        let dyn_executor: &dyn MoveExecutor = &executor;
        let report = commit_move_plan(&sample_plan()[..1], dyn_executor, &CommitOptions::default())
            .await
            .unwrap();
        assert_eq!(report.succeeded, 1);
    }
}
