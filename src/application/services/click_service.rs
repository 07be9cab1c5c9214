//! Click ingestion handler: geolocation, user-agent parsing, persistence.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::click::{ClickJob, NewClickRecord};
use crate::domain::geo::GeoContext;
use crate::domain::outcome::JobOutcome;
use crate::domain::repositories::{ClickRepository, UsageRepository};
use crate::infrastructure::geo::GeoLocator;
use crate::queue::dispatcher::JobHandler;
use crate::utils::user_agent;

/// Service that turns a raw click job into a persisted analytics record.
///
/// Enrichment first (geolocation, user-agent classification), then the
/// click record insert, then the aggregate counter increment. Click data is
/// best-effort telemetry: a persistence failure is logged and the job is
/// dropped, with no retry — unlike the email path.
pub struct ClickService<R, U, G>
where
    R: ClickRepository,
    U: UsageRepository,
    G: GeoLocator,
{
    clicks: Arc<R>,
    usage: Arc<U>,
    geo: Arc<G>,
}

impl<R, U, G> ClickService<R, U, G>
where
    R: ClickRepository,
    U: UsageRepository,
    G: GeoLocator,
{
    /// Creates a new click ingestion service.
    pub fn new(clicks: Arc<R>, usage: Arc<U>, geo: Arc<G>) -> Self {
        Self { clicks, usage, geo }
    }

    /// Processes one click job end to end.
    pub async fn process(&self, job: ClickJob) -> JobOutcome {
        // The locator contract maps private/invalid IPs and lookup errors
        // to "Unknown" values, so no error handling is needed here.
        let geo = match job.tracking.ip.as_deref() {
            Some(ip) => self.geo.lookup(ip).await,
            None => GeoContext::unknown(),
        };

        let client = job
            .tracking
            .user_agent
            .as_deref()
            .map(user_agent::parse)
            .unwrap_or_default();

        debug!(
            redirect_id = job.redirect_id,
            country = %geo.country,
            browser = %client.browser,
            device = client.device.as_str(),
            "processing click"
        );

        let record = NewClickRecord {
            redirect_id: job.redirect_id,
            clicked_at: job.clicked_at,
            ip: job.tracking.ip,
            session_id: job.tracking.session_id,
            referrer: job.tracking.referrer,
            geo,
            client,
            utm: job.tracking.utm,
        };

        if let Err(e) = self.clicks.record_click(record).await {
            warn!(redirect_id = job.redirect_id, error = %e, "failed to persist click; dropping");
            return JobOutcome::failure_with(
                format!("click for redirect {} not persisted", job.redirect_id),
                e,
            );
        }

        if let Err(e) = self.usage.increment_counters(job.redirect_id).await {
            warn!(redirect_id = job.redirect_id, error = %e, "click stored but counters not updated");
            return JobOutcome::failure_with(
                format!(
                    "counters for redirect {} not incremented",
                    job.redirect_id
                ),
                e,
            );
        }

        JobOutcome::Success
    }
}

#[async_trait]
impl<R, U, G> JobHandler<ClickJob> for ClickService<R, U, G>
where
    R: ClickRepository + 'static,
    U: UsageRepository + 'static,
    G: GeoLocator + 'static,
{
    fn kind(&self) -> &'static str {
        "click"
    }

    async fn handle(&self, job: ClickJob) -> JobOutcome {
        self.process(job).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::click::TrackingData;
    use crate::domain::repositories::{MockClickRepository, MockUsageRepository};
    use crate::error::RepositoryError;
    use crate::infrastructure::geo::{MockGeoLocator, UnknownGeoLocator};
    use crate::utils::user_agent::DeviceKind;

    fn tracking(ip: &str, ua: &str) -> TrackingData {
        TrackingData {
            ip: Some(ip.to_string()),
            user_agent: Some(ua.to_string()),
            ..TrackingData::default()
        }
    }

    #[tokio::test]
    async fn test_click_persisted_with_enrichment() {
        let mut clicks = MockClickRepository::new();
        clicks
            .expect_record_click()
            .withf(|record: &NewClickRecord| {
                record.redirect_id == 7
                    && record.geo.country == "Germany"
                    && record.client.browser == "Firefox"
            })
            .times(1)
            .returning(|_| Ok(()));

        let mut usage = MockUsageRepository::new();
        usage
            .expect_increment_counters()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(()));

        let mut geo = MockGeoLocator::new();
        geo.expect_lookup().times(1).returning(|_| GeoContext {
            country: "Germany".to_string(),
            region: "Berlin".to_string(),
            city: "Berlin".to_string(),
            latitude: Some(52.52),
            longitude: Some(13.405),
        });

        let service = ClickService::new(Arc::new(clicks), Arc::new(usage), Arc::new(geo));
        let job = ClickJob::new(
            7,
            tracking(
                "203.0.113.9",
                "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
            ),
        );

        assert!(service.process(job).await.is_success());
    }

    #[tokio::test]
    async fn test_loopback_ip_yields_unknown_geo_without_error() {
        let mut clicks = MockClickRepository::new();
        clicks
            .expect_record_click()
            .withf(|record: &NewClickRecord| record.geo.is_unknown())
            .times(1)
            .returning(|_| Ok(()));

        let mut usage = MockUsageRepository::new();
        usage.expect_increment_counters().times(1).returning(|_| Ok(()));

        let service = ClickService::new(
            Arc::new(clicks),
            Arc::new(usage),
            Arc::new(UnknownGeoLocator::new()),
        );

        let job = ClickJob::new(1, tracking("127.0.0.1", "curl/8.4.0"));
        assert!(service.process(job).await.is_success());
    }

    #[tokio::test]
    async fn test_missing_ip_skips_lookup() {
        let mut clicks = MockClickRepository::new();
        clicks
            .expect_record_click()
            .withf(|record: &NewClickRecord| record.geo.is_unknown() && record.ip.is_none())
            .times(1)
            .returning(|_| Ok(()));

        let mut usage = MockUsageRepository::new();
        usage.expect_increment_counters().times(1).returning(|_| Ok(()));

        let mut geo = MockGeoLocator::new();
        geo.expect_lookup().times(0);

        let service = ClickService::new(Arc::new(clicks), Arc::new(usage), Arc::new(geo));
        let job = ClickJob::new(3, TrackingData::default());

        assert!(service.process(job).await.is_success());
    }

    #[tokio::test]
    async fn test_persistence_failure_drops_job_without_retry() {
        let mut clicks = MockClickRepository::new();
        clicks
            .expect_record_click()
            .times(1)
            .returning(|_| Err(RepositoryError::Storage("connection lost".to_string())));

        let mut usage = MockUsageRepository::new();
        usage.expect_increment_counters().times(0);

        let service = ClickService::new(
            Arc::new(clicks),
            Arc::new(usage),
            Arc::new(UnknownGeoLocator::new()),
        );

        let outcome = service.process(ClickJob::new(5, TrackingData::default())).await;
        assert!(!outcome.is_success());
        assert!(outcome.reason().unwrap().contains("not persisted"));
    }

    #[tokio::test]
    async fn test_counter_failure_after_persist_reported() {
        let mut clicks = MockClickRepository::new();
        clicks.expect_record_click().times(1).returning(|_| Ok(()));

        let mut usage = MockUsageRepository::new();
        usage
            .expect_increment_counters()
            .times(1)
            .returning(|_| Err(RepositoryError::Storage("deadlock".to_string())));

        let service = ClickService::new(
            Arc::new(clicks),
            Arc::new(usage),
            Arc::new(UnknownGeoLocator::new()),
        );

        let outcome = service.process(ClickJob::new(9, TrackingData::default())).await;
        assert!(!outcome.is_success());
        assert!(outcome.reason().unwrap().contains("not incremented"));
    }

    #[tokio::test]
    async fn test_missing_user_agent_defaults_to_unknown_client() {
        let mut clicks = MockClickRepository::new();
        clicks
            .expect_record_click()
            .withf(|record: &NewClickRecord| {
                record.client.browser == "Unknown" && record.client.device == DeviceKind::Unknown
            })
            .times(1)
            .returning(|_| Ok(()));

        let mut usage = MockUsageRepository::new();
        usage.expect_increment_counters().times(1).returning(|_| Ok(()));

        let service = ClickService::new(
            Arc::new(clicks),
            Arc::new(usage),
            Arc::new(UnknownGeoLocator::new()),
        );

        let job = ClickJob::new(2, TrackingData::default());
        assert!(service.process(job).await.is_success());
    }
}
