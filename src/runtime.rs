//! Job subsystem lifecycle: queue creation, dispatcher spawning, shutdown.
//!
//! The host process calls [`JobRuntime::start`] once at startup, hands the
//! [`JobProducer`] to its request handlers, and calls
//! [`JobRuntime::shutdown`] when it stops.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use crate::application::services::{ClickService, EmailService};
use crate::config::JobsConfig;
use crate::domain::repositories::{ClickRepository, UsageRepository};
use crate::infrastructure::email::EmailProvider;
use crate::infrastructure::geo::GeoLocator;
use crate::producer::JobProducer;
use crate::queue::dispatcher::run_dispatcher;
use crate::queue::job_queue::JobQueue;
use crate::queue::shutdown::ShutdownToken;

/// Handle to the two running dispatchers.
pub struct JobRuntime {
    producer: JobProducer,
    shutdown: ShutdownToken,
    email_dispatcher: JoinHandle<()>,
    click_dispatcher: JoinHandle<()>,
}

impl JobRuntime {
    /// Creates both queues and spawns one dispatcher per queue.
    ///
    /// The dispatchers are independent long-running tasks: a stalled email
    /// handler never blocks click ingestion, and vice versa.
    pub fn start<P, R, U, G>(
        config: &JobsConfig,
        provider: Arc<P>,
        clicks: Arc<R>,
        usage: Arc<U>,
        geo: Arc<G>,
    ) -> Self
    where
        P: EmailProvider + 'static,
        R: ClickRepository + 'static,
        U: UsageRepository + 'static,
        G: GeoLocator + 'static,
    {
        let email_queue = Arc::new(JobQueue::new());
        let click_queue = Arc::new(JobQueue::new());
        let shutdown = ShutdownToken::new();

        let email_service = Arc::new(EmailService::new(config.email.clone(), provider));
        let click_service = Arc::new(ClickService::new(clicks, usage, geo));

        let email_dispatcher = tokio::spawn(run_dispatcher(
            Arc::clone(&email_queue),
            email_service,
            shutdown.clone(),
        ));
        let click_dispatcher = tokio::spawn(run_dispatcher(
            Arc::clone(&click_queue),
            click_service,
            shutdown.clone(),
        ));

        info!("job dispatchers started");

        Self {
            producer: JobProducer::new(email_queue, click_queue),
            shutdown,
            email_dispatcher,
            click_dispatcher,
        }
    }

    /// Returns a cloneable producer handle for request-handling code.
    pub fn producer(&self) -> JobProducer {
        self.producer.clone()
    }

    /// Signals both dispatchers and waits for them to stop.
    ///
    /// An in-flight handler invocation completes; jobs still queued are
    /// dropped. This is the design's explicit durability limit — there is
    /// no dead-letter persistence.
    pub async fn shutdown(self) {
        info!("shutting down job dispatchers");
        self.shutdown.cancel();
        let _ = self.email_dispatcher.await;
        let _ = self.click_dispatcher.await;
        info!("job dispatchers stopped");
    }
}
