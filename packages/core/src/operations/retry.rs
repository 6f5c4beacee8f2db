//! Move executor with retry on transient failures
//!
//! Wraps any [`MoveExecutor`] and retries a move whose failure is classified as
//! retryable (rate limit or server error) with exponential backoff. Any other
//! failure is returned immediately.
//!
//! # Example
//!
//! ```rust,no_run
//! use pagetree_core::operations::{MoveExecutor, RetryingExecutor};
//! use std::time::Duration;
//!
//! # fn wrap<E: MoveExecutor>(adapter: E) {
//! // Up to 3 retries with 100ms, 200ms, 400ms backoff
//! let executor = RetryingExecutor::new(adapter, 3, Duration::from_millis(100));
//! # }
//! ```

use crate::config::EngineConfig;
use crate::models::MoveOperation;
use crate::operations::executor::{MoveExecutor, MoveFailure};
use async_trait::async_trait;
use tokio::time::Duration;

/// Executor wrapper retrying retryable failures with exponential backoff
pub struct RetryingExecutor<E> {
    /// Underlying executor
    inner: E,
    /// Retries after the first attempt (0 = single attempt)
    max_retries: usize,
    /// Backoff before the first retry; doubled on each further retry
    base_delay: Duration,
}

impl<E: MoveExecutor> RetryingExecutor<E> {
    pub fn new(inner: E, max_retries: usize, base_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
        }
    }

    /// Build from the retry settings of an [`EngineConfig`].
    pub fn from_config(inner: E, config: &EngineConfig) -> Self {
        Self::new(
            inner,
            config.max_retries,
            Duration::from_millis(config.retry_base_delay_ms),
        )
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    fn backoff(&self, attempt: usize) -> Duration {
        let factor = 1u32.checked_shl(attempt as u32).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

#[async_trait]
impl<E: MoveExecutor> MoveExecutor for RetryingExecutor<E> {
    async fn move_page(&self, operation: &MoveOperation) -> Result<(), MoveFailure> {
        let mut attempt = 0;

        loop {
            match self.inner.move_page(operation).await {
                Ok(()) => {
                    if attempt > 0 {
                        tracing::debug!(
                            "Move of page '{}' succeeded after {} retry(ies)",
                            operation.page_id,
                            attempt
                        );
                    }
                    return Ok(());
                }

                Err(failure) if failure.is_retryable() && attempt < self.max_retries => {
                    let backoff = self.backoff(attempt);
                    tracing::debug!(
                        "Transient failure on attempt {}/{} for page '{}': {}. Retrying in {:?}...",
                        attempt + 1,
                        self.max_retries + 1,
                        operation.page_id,
                        failure,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }

                Err(failure) => {
                    if failure.is_retryable() {
                        tracing::warn!(
                            "Max retries ({}) exceeded for page '{}' move",
                            self.max_retries,
                            operation.page_id
                        );
                    }
                    return Err(failure);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MoveReason, PlacementRef};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Fails with `message` for the first `failures` calls, then succeeds
    struct FlakyExecutor {
        calls: AtomicUsize,
        failures: usize,
        message: &'static str,
    }

    impl FlakyExecutor {
        fn new(failures: usize, message: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failures,
                message,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MoveExecutor for FlakyExecutor {
        async fn move_page(&self, _operation: &MoveOperation) -> Result<(), MoveFailure> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(MoveFailure::new(self.message))
            } else {
                Ok(())
            }
        }
    }

    fn operation() -> MoveOperation {
        MoveOperation {
            page_id: "page-1".to_string(),
            from_parent_id: Some("root".to_string()),
            to_parent_id: Some("p".to_string()),
            from_index: 0,
            to_index: 0,
            placement: PlacementRef::append_to("p"),
            reason: MoveReason::ParentChange,
        }
    }

    #[tokio::test]
    async fn test_retries_transient_failures_until_success() {
        let inner = Arc::new(FlakyExecutor::new(2, "Move failed (page-1): 429 Too Many Requests"));
        let executor = RetryingExecutor::new(inner.clone(), 3, Duration::from_millis(1));

        executor.move_page(&operation()).await.unwrap();
        assert_eq!(inner.calls(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let executor = RetryingExecutor::new(
            FlakyExecutor::new(10, "Move failed (page-1): 500 Internal Server Error"),
            2,
            Duration::from_millis(1),
        );

        let failure = executor.move_page(&operation()).await.unwrap_err();
        assert!(failure.is_retryable());
        assert_eq!(executor.inner().calls(), 3);
    }

    #[tokio::test]
    async fn test_fatal_failures_are_not_retried() {
        let executor = RetryingExecutor::new(
            FlakyExecutor::new(1, "Move failed (page-1): 403 Forbidden"),
            5,
            Duration::from_millis(1),
        );

        assert!(executor.move_page(&operation()).await.is_err());
        assert_eq!(executor.inner().calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_retries_is_single_attempt() {
        let executor = RetryingExecutor::new(
            FlakyExecutor::new(1, "Move failed (page-1): 502 Bad Gateway"),
            0,
            Duration::from_millis(1),
        );

        assert!(executor.move_page(&operation()).await.is_err());
        assert_eq!(executor.inner().calls(), 1);
    }

    #[test]
    fn test_backoff_doubles() {
        let config = EngineConfig {
            retry_base_delay_ms: 10,
            ..EngineConfig::default()
        };
        let executor = RetryingExecutor::from_config(FlakyExecutor::new(0, ""), &config);
        assert_eq!(executor.backoff(0), Duration::from_millis(10));
        assert_eq!(executor.backoff(1), Duration::from_millis(20));
        assert_eq!(executor.backoff(3), Duration::from_millis(80));
    }
}
