//! Cooperative shutdown signal shared by the dispatchers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// A cloneable cancellation flag with async wait support.
///
/// One token is created per process; every clone observes the same flag.
/// Dispatchers check it at their dequeue suspension point, so an idle
/// dispatcher stops promptly while an in-flight handler invocation is
/// allowed to finish.
#[derive(Clone, Default)]
pub struct ShutdownToken {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals shutdown to every clone of this token. Idempotent.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    ///
    /// Returns immediately if the token is already cancelled.
    pub async fn cancelled(&self) {
        loop {
            if self.is_cancelled() {
                return;
            }
            let notified = self.inner.notify.notified();
            // Re-check after registering: cancel() may have fired between
            // the flag load and the waiter registration.
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}
