//! Thread-safe FIFO hand-off between concurrent producers and one consumer.

use std::collections::VecDeque;
use std::sync::Mutex;

use tokio::sync::Semaphore;

use crate::error::Cancelled;
use crate::queue::shutdown::ShutdownToken;

/// An unbounded FIFO queue with an async "item available" signal.
///
/// Producers call [`enqueue`](Self::enqueue) from any task or thread without
/// coordination; it never blocks and never fails on capacity. A single
/// dispatcher loop calls [`dequeue`](Self::dequeue), which suspends until an
/// item arrives or shutdown fires.
///
/// The semaphore's permit count mirrors the queue depth: `enqueue` pushes
/// then adds one permit, `dequeue` wins one permit then pops. Multiple
/// concurrent consumers would be safe, but FIFO ordering per producer is
/// only meaningful with the system's actual pattern of one dispatcher per
/// queue.
pub struct JobQueue<T> {
    items: Mutex<VecDeque<T>>,
    ready: Semaphore,
}

impl<T> JobQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            ready: Semaphore::new(0),
        }
    }

    /// Appends an item to the tail. O(1), non-blocking, infallible.
    pub fn enqueue(&self, item: T) {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(item);
        self.ready.add_permits(1);
    }

    /// Waits for the next item or for shutdown, whichever comes first.
    ///
    /// Cancellation is checked with priority: a token that is already
    /// cancelled fails the call immediately and consumes nothing, even if
    /// items are queued. A won permit paired with an empty deque (spurious
    /// wake) yields `Ok(None)` rather than panicking.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] when the shutdown token fires first.
    pub async fn dequeue(&self, shutdown: &ShutdownToken) -> Result<Option<T>, Cancelled> {
        tokio::select! {
            biased;

            _ = shutdown.cancelled() => Err(Cancelled),
            permit = self.ready.acquire() => match permit {
                Ok(permit) => {
                    permit.forget();
                    Ok(self
                        .items
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .pop_front())
                }
                // The semaphore is never closed; treat it as a spurious wake.
                Err(_) => Ok(None),
            },
        }
    }

    /// Number of items enqueued but not yet dequeued.
    pub fn depth(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth() == 0
    }
}

impl<T> Default for JobQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
