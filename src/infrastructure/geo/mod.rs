//! IP geolocation.

pub mod locator;
pub mod unknown;

pub use locator::GeoLocator;
pub use unknown::UnknownGeoLocator;

#[cfg(test)]
pub use locator::MockGeoLocator;
