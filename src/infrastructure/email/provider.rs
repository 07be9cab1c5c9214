//! Email provider contract.

use crate::domain::email::EmailRequest;
use crate::error::ProviderError;
use async_trait::async_trait;

/// Boundary to the outbound email transport.
///
/// All wire-protocol concerns (SMTP sessions, TLS, connection pooling) live
/// behind this trait; the delivery handler only sees transient/permanent
/// failure classification.
///
/// # Implementations
///
/// - [`crate::infrastructure::email::SmtpEmailProvider`] - lettre-backed SMTP
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Delivers a single email.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Transient`] for failures worth retrying and
    /// [`ProviderError::Permanent`] for ones that are not.
    async fn send(&self, request: &EmailRequest) -> Result<(), ProviderError>;
}
