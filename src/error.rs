//! Error types at the collaborator boundaries.
//!
//! Handler outcomes are modeled as values ([`crate::domain::JobOutcome`]);
//! the types here describe why a collaborator call failed, not whether a job
//! as a whole succeeded.

use thiserror::Error;

/// Failure reported by an email provider.
///
/// The transient/permanent split drives the retry loop in
/// [`crate::application::services::EmailService`]: transient failures are
/// retried with a fixed delay, permanent failures are not.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A failure that may succeed on a later attempt (connection reset,
    /// 4xx SMTP response, provider throttling).
    #[error("transient provider failure: {0}")]
    Transient(String),

    /// A failure that will not succeed on retry (rejected recipient,
    /// 5xx SMTP response, malformed message).
    #[error("permanent provider failure: {0}")]
    Permanent(String),
}

impl ProviderError {
    /// Returns true if a retry of the same send may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::Transient(_))
    }
}

/// Failure reported by a click or usage repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The referenced redirect does not exist.
    #[error("redirect {0} not found")]
    RedirectNotFound(i64),

    /// Any other storage-level failure.
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Returned by [`crate::queue::JobQueue::dequeue`] when the shutdown token
/// fires before an item becomes available.
#[derive(Debug, Error)]
#[error("dequeue cancelled by shutdown")]
pub struct Cancelled;
