//! Fire-and-forget producer surface exposed to request handlers.

use std::sync::Arc;

use crate::domain::click::{ClickJob, TrackingData};
use crate::domain::email::{EmailJob, EmailRequest};
use crate::queue::job_queue::JobQueue;

/// Cloneable handle for enqueuing jobs from request-handling code.
///
/// Every method is synchronous, non-blocking, and returns nothing: producers
/// get no success/failure channel back. Outcomes are observable only through
/// logs on the consumer side — by design.
#[derive(Clone)]
pub struct JobProducer {
    email_queue: Arc<JobQueue<EmailJob>>,
    click_queue: Arc<JobQueue<ClickJob>>,
}

impl JobProducer {
    pub(crate) fn new(
        email_queue: Arc<JobQueue<EmailJob>>,
        click_queue: Arc<JobQueue<ClickJob>>,
    ) -> Self {
        Self {
            email_queue,
            click_queue,
        }
    }

    /// Queues a single email for background delivery.
    pub fn enqueue_email(&self, request: EmailRequest) {
        self.email_queue.enqueue(EmailJob::Single(request));
    }

    /// Queues a bulk email campaign. An empty request list is ignored.
    pub fn enqueue_bulk_email(&self, requests: Vec<EmailRequest>) {
        if requests.is_empty() {
            return;
        }
        self.email_queue.enqueue(EmailJob::Bulk(requests));
    }

    /// Queues a click event for background ingestion, timestamped now.
    pub fn enqueue_click(&self, redirect_id: i64, tracking: TrackingData) {
        self.click_queue.enqueue(ClickJob::new(redirect_id, tracking));
    }

    /// Current depth of the email queue.
    pub fn email_queue_depth(&self) -> usize {
        self.email_queue.depth()
    }

    /// Current depth of the click queue.
    pub fn click_queue_depth(&self) -> usize {
        self.click_queue.depth()
    }
}
