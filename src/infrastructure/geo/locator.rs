//! Geolocation lookup contract.

use crate::domain::geo::GeoContext;
use async_trait::async_trait;

/// Boundary to the IP geolocation service.
///
/// The lookup is infallible by contract: implementations must resolve
/// private, loopback, and invalid addresses, as well as their own lookup
/// errors, to [`GeoContext::unknown`] instead of failing. The click handler
/// relies on this and performs no error handling around the call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Resolves location context for a client IP address.
    async fn lookup(&self, ip: &str) -> GeoContext;
}
