//! Rate-limit retry wrapper
//!
//! Wraps one agent/chain invocation with fixed-backoff retry. Detection is
//! a case-insensitive substring match against a small fixed marker set;
//! backend error codes were never specified upstream, so the match stays
//! message-based and isolated here for later replacement.

use std::future::Future;
use std::time::Duration;

use crate::error::Result;

/// Error-message fragments that indicate a rate-limited request
pub const RATE_LIMIT_MARKERS: &[&str] = &["rate limit", "requests", "threshold"];

/// Whether an error message looks like a rate-limit failure
pub fn is_rate_limit_error(message: &str) -> bool {
    let lowered = message.to_lowercase();
    RATE_LIMIT_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Retry configuration: total attempt budget and the fixed backoff
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Maximum attempts including the initial one
    pub max_retries: usize,
    /// Fixed sleep between attempts
    pub backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 10,
            backoff: Duration::from_secs(60),
        }
    }
}

/// Run `operation`, retrying only on rate-limit-flavored failures.
///
/// A non-matching first error propagates immediately with zero sleeps.
/// On a match: sleep the fixed backoff and retry, up to `max_retries - 1`
/// additional attempts, returning the first success or the final failure.
/// The sleep suspends only this cycle's task; rounds are sequential anyway.
pub async fn retry_rate_limited<T, F, Fut>(config: RetryConfig, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match operation().await {
        Ok(value) => Ok(value),
        Err(e) if is_rate_limit_error(&e.to_string()) => {
            let mut last_error = e;
            for attempt in 1..config.max_retries {
                tracing::warn!(
                    attempt,
                    backoff_secs = config.backoff.as_secs(),
                    "rate limited, backing off before retry"
                );
                tokio::time::sleep(config.backoff).await;

                match operation().await {
                    Ok(value) => return Ok(value),
                    Err(retry_error) => last_error = retry_error,
                }
            }
            Err(last_error)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TandemError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fast_config(max_retries: usize) -> RetryConfig {
        RetryConfig {
            max_retries,
            backoff: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_rate_limit_markers() {
        assert!(is_rate_limit_error("Rate Limit exceeded"));
        assert!(is_rate_limit_error("too many requests"));
        assert!(is_rate_limit_error("call threshold reached"));
        assert!(!is_rate_limit_error("file not found"));
        assert!(!is_rate_limit_error("invalid api key"));
    }

    #[tokio::test]
    async fn test_success_passes_through_without_retry() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls2 = calls.clone();

        let result = retry_rate_limited(fast_config(10), move || {
            let calls = calls2.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, TandemError>(42)
            }
        })
        .await
        .unwrap();

        assert_eq!(result, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_once_then_success() {
        // One rate-limit failure, then success: exactly one backoff sleep,
        // so exactly two invocations.
        let calls = Arc::new(AtomicUsize::new(0));
        let calls2 = calls.clone();

        let result = retry_rate_limited(fast_config(10), move || {
            let calls = calls2.clone();
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(TandemError::Llm("rate limit exceeded".to_string()))
                } else {
                    Ok("ok")
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(result, "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_rate_limit_error_propagates_immediately() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls2 = calls.clone();

        let result: Result<()> = retry_rate_limited(fast_config(10), move || {
            let calls = calls2.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(TandemError::Llm("invalid api key".to_string()))
            }
        })
        .await;

        assert!(result.is_err());
        // Zero sleeps: the single attempt was the only call
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_budget_exhaustion_reraises_final_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls2 = calls.clone();

        let result: Result<()> = retry_rate_limited(fast_config(3), move || {
            let calls = calls2.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Err(TandemError::Llm(format!("rate limit hit ({})", n)))
            }
        })
        .await;

        let err = result.unwrap_err();
        // Initial attempt + 2 retries; the last error is the one surfaced
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(err.to_string().contains("(2)"));
    }
}
