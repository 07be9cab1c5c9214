//! # LinkHub Jobs
//!
//! In-process background job dispatch for the LinkHub link-management
//! service: asynchronous email delivery and click-event ingestion.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer
//! separation:
//!
//! - **Domain Layer** ([`domain`]) - Job payloads, outcome values, and
//!   repository traits
//! - **Queue Layer** ([`queue`]) - The FIFO hand-off, shutdown token, and
//!   dispatcher loop
//! - **Application Layer** ([`application`]) - The email and click job
//!   handlers
//! - **Infrastructure Layer** ([`infrastructure`]) - SMTP transport and
//!   geolocation implementations
//!
//! ## Design
//!
//! Two independent queues decouple synchronous request handling from
//! side-effects. Producers enqueue without blocking; one dispatcher per
//! queue processes jobs in order, isolates handler failures, and observes a
//! cooperative shutdown signal. Queues are in-memory and unbounded: items
//! still queued at shutdown are dropped.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use linkhub_jobs::config;
//! use linkhub_jobs::infrastructure::email::{SmtpConfig, SmtpEmailProvider};
//! use linkhub_jobs::infrastructure::geo::UnknownGeoLocator;
//! use linkhub_jobs::runtime::JobRuntime;
//!
//! let jobs_config = config::load_from_env()?;
//! let provider = Arc::new(SmtpEmailProvider::new(&SmtpConfig::from_env()?)?);
//!
//! let runtime = JobRuntime::start(
//!     &jobs_config,
//!     provider,
//!     click_repository,   // host-provided
//!     usage_repository,   // host-provided
//!     Arc::new(UnknownGeoLocator::new()),
//! );
//!
//! // Hand to request handlers:
//! let producer = runtime.producer();
//! producer.enqueue_email(request);
//!
//! // At process shutdown:
//! runtime.shutdown().await;
//! ```
//!
//! ## Configuration
//!
//! Behavior is loaded from environment variables via [`config::JobsConfig`].
//! See [`config`] module for available options.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod queue;
pub mod utils;

pub mod config;

pub mod producer;
pub mod runtime;

pub use producer::JobProducer;
pub use runtime::JobRuntime;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::config::{EmailConfig, JobsConfig};
    pub use crate::domain::{
        BulkReport, BulkStatus, ClickJob, EmailJob, EmailRequest, GeoContext, JobOutcome,
        NewClickRecord, TrackingData, UtmParams,
    };
    pub use crate::domain::repositories::{ClickRepository, UsageRepository};
    pub use crate::error::{ProviderError, RepositoryError};
    pub use crate::infrastructure::email::EmailProvider;
    pub use crate::infrastructure::geo::GeoLocator;
    pub use crate::producer::JobProducer;
    pub use crate::queue::{JobHandler, JobQueue, ShutdownToken};
    pub use crate::runtime::JobRuntime;
}
