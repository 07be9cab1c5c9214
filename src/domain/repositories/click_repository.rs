//! Repository trait for persisting click records.

use crate::domain::click::NewClickRecord;
use crate::error::RepositoryError;
use async_trait::async_trait;

/// Persistence boundary for individual click records.
///
/// Implementations live in the host application (the web service owns the
/// database); this crate only defines the contract the click handler calls.
///
/// # Implementations
///
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Persists one enriched click record.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::RedirectNotFound`] if the referenced
    /// redirect does not exist.
    /// Returns [`RepositoryError::Storage`] on storage errors.
    async fn record_click(&self, record: NewClickRecord) -> Result<(), RepositoryError>;
}
