//! The background dispatcher loop.
//!
//! One dispatcher runs per queue for the process lifetime. It pulls jobs in
//! FIFO order, hands each to its handler inside a panic-isolating boundary,
//! and observes the shutdown token at its dequeue suspension point. The two
//! dispatchers in the system (email, click) share nothing, so a stalled
//! email handler never blocks click ingestion.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinError;
use tracing::{debug, error, info, warn};

use crate::domain::outcome::JobOutcome;
use crate::queue::job_queue::JobQueue;
use crate::queue::shutdown::ShutdownToken;

/// Processes one job pulled from a queue.
///
/// Implementations must express expected failures as
/// [`JobOutcome::Failure`]; a panic is treated as a bug, caught at the
/// dispatcher boundary, and logged without killing the loop.
#[async_trait]
pub trait JobHandler<T>: Send + Sync + 'static {
    /// Short label used in log lines ("email", "click").
    fn kind(&self) -> &'static str;

    async fn handle(&self, job: T) -> JobOutcome;
}

/// Runs the dispatch loop until the shutdown token fires.
///
/// Guarantees:
/// - jobs are processed one at a time, in dequeue order;
/// - a handler failure or panic is logged and the loop proceeds;
/// - cancellation is only observed while suspended on the queue, so an
///   in-flight handler invocation always runs to completion;
/// - items still queued at shutdown are dropped (no persistence).
pub async fn run_dispatcher<T, H>(queue: Arc<JobQueue<T>>, handler: Arc<H>, shutdown: ShutdownToken)
where
    T: Send + 'static,
    H: JobHandler<T> + ?Sized,
{
    let kind = handler.kind();
    info!(kind, "dispatcher started");

    loop {
        let job = match queue.dequeue(&shutdown).await {
            Ok(Some(job)) => job,
            Ok(None) => continue,
            Err(_) => break,
        };

        // A spawned task gives us a panic boundary: the JoinError tells us
        // the handler blew up without unwinding through this loop.
        let invocation = {
            let handler = Arc::clone(&handler);
            tokio::spawn(async move { handler.handle(job).await })
        };

        match invocation.await {
            Ok(JobOutcome::Success) => {
                debug!(kind, "job completed");
            }
            Ok(JobOutcome::Failure { reason, source }) => {
                match source {
                    Some(source) => warn!(kind, reason = %reason, error = %source, "job failed"),
                    None => warn!(kind, reason = %reason, "job failed"),
                }
            }
            Err(join_error) if join_error.is_panic() => {
                error!(kind, panic = %panic_message(join_error), "job handler panicked; continuing");
            }
            Err(_) => {
                // Runtime is tearing down underneath us.
                break;
            }
        }
    }

    let dropped = queue.depth();
    if dropped > 0 {
        warn!(kind, dropped, "dispatcher stopped with unprocessed jobs");
    } else {
        info!(kind, "dispatcher stopped");
    }
}

/// Extracts a printable message from a panicked task.
fn panic_message(join_error: JoinError) -> String {
    let payload = join_error.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}
