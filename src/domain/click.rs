//! Click-tracking job payloads.
//!
//! A [`ClickJob`] is created in the redirect path with raw request metadata
//! and sent to the click queue. The background handler enriches it with
//! geolocation and parsed user-agent data, producing a [`NewClickRecord`]
//! for persistence. This decouples the HTTP redirect from analytics writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::geo::GeoContext;
use crate::utils::user_agent::ClientInfo;

/// UTM campaign parameters captured from the redirect URL query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UtmParams {
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub term: Option<String>,
    pub content: Option<String>,
}

/// Raw request metadata captured at redirect time.
///
/// All fields are optional to handle missing headers gracefully.
#[derive(Debug, Clone, Default)]
pub struct TrackingData {
    pub ip: Option<String>,
    pub session_id: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub utm: Option<UtmParams>,
}

/// Payload of the click queue: one redirect hit awaiting ingestion.
#[derive(Debug, Clone)]
pub struct ClickJob {
    pub redirect_id: i64,
    pub tracking: TrackingData,
    /// Captured at enqueue time, not at processing time, so queue latency
    /// does not skew analytics timestamps.
    pub clicked_at: DateTime<Utc>,
}

impl ClickJob {
    /// Creates a click job timestamped now.
    pub fn new(redirect_id: i64, tracking: TrackingData) -> Self {
        Self {
            redirect_id,
            tracking,
            clicked_at: Utc::now(),
        }
    }
}

/// A fully enriched click ready for persistence.
#[derive(Debug, Clone)]
pub struct NewClickRecord {
    pub redirect_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub ip: Option<String>,
    pub session_id: Option<String>,
    pub referrer: Option<String>,
    pub geo: GeoContext,
    pub client: ClientInfo,
    pub utm: Option<UtmParams>,
}
