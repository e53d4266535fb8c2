// SPDX-License-Identifier: MIT

//! Bounded retry with exponential backoff for outbound API calls.

use crate::services::ApiClientError;
use std::future::Future;
use std::time::Duration;

/// Total attempts, including the first one.
const MAX_ATTEMPTS: u32 = 3;
/// Delay before the first retry; doubles on each subsequent retry.
const INITIAL_DELAY: Duration = Duration::from_millis(200);

/// Run `op` until it succeeds or the retry budget is exhausted, sleeping
/// with exponentially growing delays in between. Only transient errors
/// are retried; a deterministic failure (4xx, malformed response) is
/// returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    op_name: &str,
    mut op: F,
) -> Result<T, ApiClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiClientError>>,
{
    let mut delay = INITIAL_DELAY;

    for attempt in 1..MAX_ATTEMPTS {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() => {
                tracing::warn!(
                    operation = op_name,
                    attempt,
                    error = %e,
                    "Outbound call failed, retrying"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => return Err(e),
        }
    }

    op().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_returns_first_success() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(7) }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_transient_then_succeeds() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff("test", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(ApiClientError::Status(503, "down".to_string()))
                } else {
                    Ok(9)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 9);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausts_budget_on_persistent_transient_failure() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, _> = retry_with_backoff("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ApiClientError::Request("connection reset".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(ApiClientError::Request(_))));
        assert_eq!(calls.load(Ordering::SeqCst), MAX_ATTEMPTS);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, _> = retry_with_backoff("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ApiClientError::Status(400, "bad query".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(ApiClientError::Status(400, _))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_responses_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, _> = retry_with_backoff("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ApiClientError::Shape("missing field".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(ApiClientError::Shape(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
