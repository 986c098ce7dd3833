use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::error::ExchangeError;

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Bounded retry with a fixed inter-attempt delay, shared by candle
/// retrieval and order submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Run `op` until it succeeds or `max_attempts` is reached. Returns
    /// the last error on exhaustion.
    pub async fn run<T, F, Fut>(&self, op_name: &str, mut op: F) -> Result<T, ExchangeError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ExchangeError>>,
    {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            match op().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(op = op_name, attempt, "succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) => {
                    tracing::warn!(
                        op = op_name,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "attempt failed"
                    );
                    last_error = Some(e);

                    if attempt < self.max_attempts {
                        sleep(self.delay).await;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| ExchangeError::Protocol("retry policy ran zero attempts".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_fails_twice_then_succeeds_with_fixed_delays() {
        let policy = RetryPolicy::default();
        let attempts = AtomicU32::new(0);
        let started = Instant::now();

        let result = policy
            .run("test op", || {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 3 {
                        Err(ExchangeError::Protocol(format!("boom {n}")))
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        // Two inter-attempt delays of 2s each must have elapsed.
        assert!(started.elapsed() >= Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_last_error_after_exhaustion() {
        let policy = RetryPolicy::new(3, Duration::from_secs(2));
        let attempts = AtomicU32::new(0);

        let result: Result<(), _> = policy
            .run("always failing", || {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Err(ExchangeError::Protocol(format!("boom {n}"))) }
            })
            .await;

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("boom 3"));
    }

    #[tokio::test]
    async fn test_success_on_first_attempt_sleeps_never() {
        let policy = RetryPolicy::new(3, Duration::from_secs(2));
        let attempts = AtomicU32::new(0);

        let result = policy
            .run("immediate", || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Ok("done") }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
