//! Repository trait for aggregate usage counters.

use crate::error::RepositoryError;
use async_trait::async_trait;

/// Persistence boundary for aggregate click counters.
///
/// Covers the total click count for a redirect and the per-owner monthly
/// usage tally; the implementation resolves the owning account from the
/// redirect id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsageRepository: Send + Sync {
    /// Increments the click counters associated with a redirect.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] on storage errors.
    async fn increment_counters(&self, redirect_id: i64) -> Result<(), RepositoryError>;
}
