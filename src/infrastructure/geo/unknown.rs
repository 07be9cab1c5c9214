//! No-op geolocation implementation.

use async_trait::async_trait;
use tracing::debug;

use super::locator::GeoLocator;
use crate::domain::geo::GeoContext;

/// A geolocator that resolves everything to "Unknown".
///
/// Used when no lookup service is configured. Click records are still
/// persisted, just without location context.
pub struct UnknownGeoLocator;

impl UnknownGeoLocator {
    /// Creates a new UnknownGeoLocator instance.
    pub fn new() -> Self {
        debug!("Using UnknownGeoLocator (geolocation disabled)");
        Self
    }
}

impl Default for UnknownGeoLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GeoLocator for UnknownGeoLocator {
    async fn lookup(&self, _ip: &str) -> GeoContext {
        GeoContext::unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_unknown() {
        let locator = UnknownGeoLocator::new();
        assert!(locator.lookup("8.8.8.8").await.is_unknown());
        assert!(locator.lookup("127.0.0.1").await.is_unknown());
        assert!(locator.lookup("not-an-ip").await.is_unknown());
    }
}
