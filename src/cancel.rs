//! Cooperative cancellation of in-flight API calls.

use std::pin::pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// A handle for aborting a logical API call.
///
/// The token is threaded through the whole call: it interrupts the network
/// round trip as well as any backoff wait between retry attempts. Firing it
/// makes the call return [`Error::Cancelled`](crate::Error::Cancelled)
/// promptly instead of whatever the last attempt produced.
///
/// Cloning the token is cheap; all clones observe the same state, so one
/// clone can be handed to the request builder while another stays with the
/// caller.
///
/// # Examples
///
/// ```no_run
/// use geoapify::{CancelToken, Client};
///
/// # async fn example() -> Result<(), geoapify::Error> {
/// let client = Client::new("YOUR_API_KEY")?;
/// let token = CancelToken::new();
///
/// let call = client
///     .geocoding()
///     .search("Tower Bridge, London")
///     .cancel_token(token.clone())
///     .send();
///
/// // Somewhere else: token.cancel();
/// let result = call.await;
/// # let _ = result;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    /// Creates a new, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the token, waking every pending [`cancelled`](Self::cancelled) wait.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// Returns `true` if [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the token is cancelled.
    ///
    /// Returns immediately if the token was already cancelled.
    pub async fn cancelled(&self) {
        let mut notified = pin!(self.inner.notify.notified());
        // Register for wakeups before checking the flag so a concurrent
        // cancel() cannot slip between the check and the await.
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn starts_not_cancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_resolves_immediately_when_already_fired() {
        let token = CancelToken::new();
        token.cancel();
        assert!(token.is_cancelled());
        token.cancelled().await;
    }

    #[tokio::test]
    async fn cancel_wakes_pending_wait() {
        let token = CancelToken::new();
        let waiter = token.clone();

        let handle = tokio::spawn(async move {
            waiter.cancelled().await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("waiter should be woken")
            .expect("waiter should not panic");
    }

    #[tokio::test]
    async fn clones_share_state() {
        let token = CancelToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
