//! Retry policy with exponential backoff and jitter.
//!
//! A [`RetryConfig`] wraps the client's single-attempt dispatch in a bounded
//! retry loop. Only responses flagged as transient by the dispatch (HTTP 429
//! and 5xx) are retried; transport and serialization errors carry no retry
//! hint and propagate on first occurrence.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::cancel::CancelToken;
use crate::error::{Error, Result};

/// Configuration for retrying transient API failures.
///
/// Attached once at client construction via
/// [`ClientBuilder::retry`](crate::ClientBuilder::retry) and shared by every
/// call made through that client. Without it each call performs a single
/// attempt.
///
/// The delay before retry attempt `k` (zero-indexed) is
/// `min(initial_delay * 2^k, max_delay)` scaled by a random factor in
/// `[0.5, 1.0]`, unless the server supplied a `Retry-After` header with an
/// integer number of seconds, which is honored verbatim.
///
/// # Examples
///
/// ```
/// use geoapify::RetryConfig;
/// use std::time::Duration;
///
/// // Up to 3 retries: ~100ms, ~200ms, ~400ms (each scaled by jitter).
/// let retry = RetryConfig::new(3, Duration::from_millis(100), Duration::from_secs(10));
/// # let _ = retry;
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    max_retries: u32,
    initial_delay: Duration,
    max_delay: Duration,
}

/// Server backpressure information captured from a retryable response.
#[derive(Debug, Default)]
pub(crate) struct RetryHint {
    /// Raw `Retry-After` header value, if the response carried one.
    pub(crate) retry_after: Option<String>,
}

/// The outcome of a failed dispatch attempt.
///
/// A `hint` is present only for retryable HTTP failures; its absence makes
/// the failure terminal regardless of remaining attempts.
#[derive(Debug)]
pub(crate) struct AttemptFailure {
    pub(crate) hint: Option<RetryHint>,
    pub(crate) error: Error,
}

impl AttemptFailure {
    /// A failure that must never be retried.
    pub(crate) fn fatal(error: Error) -> Self {
        Self { hint: None, error }
    }

    /// A transient failure, optionally carrying the server's `Retry-After` value.
    pub(crate) fn retryable(error: Error, retry_after: Option<String>) -> Self {
        Self {
            hint: Some(RetryHint { retry_after }),
            error,
        }
    }
}

impl RetryConfig {
    /// Creates a retry configuration.
    ///
    /// `max_retries` is the number of retry attempts on top of the initial
    /// one (0 means a single attempt). `initial_delay` seeds the exponential
    /// backoff, which is capped at `max_delay`.
    pub fn new(max_retries: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
            max_delay,
        }
    }

    /// Runs `dispatch` until it succeeds, fails permanently, or retries are
    /// exhausted. Waits between attempts race against `cancel`.
    pub(crate) async fn run<T, F, Fut>(&self, cancel: &CancelToken, mut dispatch: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, AttemptFailure>>,
    {
        let mut attempt = 0u32;
        loop {
            let failure = match dispatch().await {
                Ok(value) => return Ok(value),
                Err(failure) => failure,
            };

            let Some(hint) = failure.hint else {
                return Err(failure.error);
            };
            if attempt >= self.max_retries {
                return Err(failure.error);
            }

            let delay = self.delay_for(attempt, &hint);
            tracing::warn!(
                error = %failure.error,
                attempt = attempt,
                delay_ms = delay.as_millis() as u64,
                "Transient failure, retrying after delay"
            );

            tokio::select! {
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }

            attempt += 1;
        }
    }

    /// Computes the wait before retry attempt `attempt` (zero-indexed).
    fn delay_for(&self, attempt: u32, hint: &RetryHint) -> Duration {
        // A parseable Retry-After header takes absolute precedence.
        if let Some(seconds) = hint
            .retry_after
            .as_deref()
            .and_then(|value| value.parse::<u64>().ok())
        {
            return Duration::from_secs(seconds);
        }

        let backoff = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay);

        // Jitter: 50-100% of the computed backoff.
        let factor = rand::thread_rng().gen_range(0.5..=1.0);
        backoff.mul_f64(factor)
    }
}
