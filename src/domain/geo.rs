//! Geolocation context attached to click records.

/// Placeholder value used when a field could not be resolved.
pub const UNKNOWN: &str = "Unknown";

/// Location context resolved from a client IP address.
///
/// Geolocation lookups never fail from the click handler's point of view:
/// private, loopback, and invalid addresses, as well as lookup errors, all
/// resolve to [`GeoContext::unknown`]. The handler treats the lookup as
/// always-succeeding.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoContext {
    pub country: String,
    pub region: String,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GeoContext {
    /// Returns the "Unknown" placeholder context.
    pub fn unknown() -> Self {
        Self {
            country: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
            latitude: None,
            longitude: None,
        }
    }

    /// Returns true if no field was resolved.
    pub fn is_unknown(&self) -> bool {
        self.country == UNKNOWN && self.region == UNKNOWN && self.city == UNKNOWN
    }
}

impl Default for GeoContext {
    fn default() -> Self {
        Self::unknown()
    }
}
