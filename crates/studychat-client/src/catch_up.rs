//! Backlog fetching for client sessions.

use std::time::Duration;

use async_trait::async_trait;
use studychat_core::error::DomainError;
use studychat_core::event::StoredEvent;
use studychat_messaging::application::event_store::ChatEventStore;
use tracing::warn;
use uuid::Uuid;

/// Where a client reads the backlog from.
///
/// Fetching is read-only and idempotent, so callers may retry freely.
#[async_trait]
pub trait CatchUpSource: Send + Sync {
    /// Returns every event strictly after `cursor`, or the full log.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CursorNotFound` if the source rejects the cursor,
    /// or any error raised while reading.
    async fn fetch_since(&self, cursor: Option<Uuid>) -> Result<Vec<StoredEvent>, DomainError>;
}

#[async_trait]
impl CatchUpSource for ChatEventStore {
    async fn fetch_since(&self, cursor: Option<Uuid>) -> Result<Vec<StoredEvent>, DomainError> {
        self.events_since(cursor).await
    }
}

/// Fetches the backlog, giving each attempt `timeout` and retrying timed-out
/// attempts up to `attempts` times in total. Errors other than timeouts are
/// returned immediately.
///
/// # Errors
///
/// Returns the source's error, or `DomainError::Infrastructure` once every
/// attempt has timed out.
pub async fn fetch_with_retry(
    source: &dyn CatchUpSource,
    cursor: Option<Uuid>,
    timeout: Duration,
    attempts: u32,
) -> Result<Vec<StoredEvent>, DomainError> {
    let attempts = attempts.max(1);
    for attempt in 1..=attempts {
        match tokio::time::timeout(timeout, source.fetch_since(cursor)).await {
            Ok(result) => return result,
            Err(_) => warn!(attempt, attempts, ?timeout, "catch-up fetch timed out"),
        }
    }
    Err(DomainError::Infrastructure(format!(
        "catch-up fetch timed out after {attempts} attempts"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Never answers for the first `stalls` calls, then returns an empty
    /// backlog.
    struct StallingSource {
        stalls: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl CatchUpSource for StallingSource {
        async fn fetch_since(
            &self,
            _cursor: Option<Uuid>,
        ) -> Result<Vec<StoredEvent>, DomainError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.stalls {
                std::future::pending::<()>().await;
            }
            Ok(Vec::new())
        }
    }

    struct RejectingSource;

    #[async_trait]
    impl CatchUpSource for RejectingSource {
        async fn fetch_since(&self, cursor: Option<Uuid>) -> Result<Vec<StoredEvent>, DomainError> {
            Err(DomainError::CursorNotFound(cursor.unwrap_or_default()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_fetch_is_retried() {
        // Arrange
        let source = StallingSource {
            stalls: 2,
            calls: AtomicU32::new(0),
        };

        // Act
        let result = fetch_with_retry(&source, None, Duration::from_secs(1), 3).await;

        // Assert
        assert!(result.unwrap().is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_gives_up_after_all_attempts_time_out() {
        let source = StallingSource {
            stalls: u32::MAX,
            calls: AtomicU32::new(0),
        };

        let result = fetch_with_retry(&source, None, Duration::from_secs(1), 2).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_source_errors_are_not_retried() {
        let cursor = Uuid::new_v4();

        let result = fetch_with_retry(&RejectingSource, Some(cursor), Duration::from_secs(1), 3).await;

        assert!(matches!(result, Err(DomainError::CursorNotFound(id)) if id == cursor));
    }
}
