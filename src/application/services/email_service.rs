//! Email delivery handler: validation, domain filtering, throttled bulk
//! sending, and fixed-delay retry.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, info, warn};

use crate::config::EmailConfig;
use crate::domain::email::{EmailJob, EmailRequest};
use crate::domain::outcome::{BulkReport, BulkStatus, JobOutcome, SendReport};
use crate::error::ProviderError;
use crate::infrastructure::email::EmailProvider;
use crate::queue::dispatcher::JobHandler;
use crate::utils::email::domain_of;

/// Service for delivering single and bulk emails through a provider.
///
/// Every outcome is a [`JobOutcome`] value; this service never propagates a
/// provider error to its caller. Transient provider failures are retried a
/// fixed number of times with a fixed delay — deliberately not exponential
/// backoff, matching the configured `max_retry_attempts`/`retry_delay`
/// semantics.
pub struct EmailService<P: EmailProvider> {
    config: EmailConfig,
    provider: Arc<P>,
}

impl<P: EmailProvider> EmailService<P> {
    /// Creates a new email delivery service.
    pub fn new(config: EmailConfig, provider: Arc<P>) -> Self {
        Self { config, provider }
    }

    /// Sends a single email.
    ///
    /// Checks, in order:
    /// 1. recipient and subject are non-empty;
    /// 2. the recipient domain passes the allow-list (when non-empty) and
    ///    the deny-list;
    /// 3. sending is enabled — when disabled the send is skipped and
    ///    reported as success.
    ///
    /// Only then is the provider invoked, inside the retry loop. A request
    /// that fails validation or filtering never reaches the provider.
    pub async fn send(&self, request: &EmailRequest) -> JobOutcome {
        if let Err(reason) = self.validate(request) {
            warn!(to = %request.to, reason = %reason, "email rejected before send");
            return JobOutcome::failure(reason);
        }

        if !self.config.sending_enabled {
            info!(to = %request.to, subject = %request.subject, "email sending disabled; skipping");
            return JobOutcome::Success;
        }

        if self.config.log_email_content {
            debug!(
                to = %request.to,
                subject = %request.subject,
                body = %request.body,
                metadata = ?request.metadata,
                "sending email"
            );
        } else {
            debug!(to = %request.to, subject = %request.subject, "sending email");
        }

        let retries = self.config.max_retry_attempts.saturating_sub(1);
        let strategy = FixedInterval::new(self.config.retry_delay).take(retries);

        let result = RetryIf::spawn(
            strategy,
            || self.provider.send(request),
            |e: &ProviderError| e.is_transient(),
        )
        .await;

        match result {
            Ok(()) => {
                debug!(to = %request.to, "email sent");
                JobOutcome::Success
            }
            Err(e) => {
                warn!(
                    to = %request.to,
                    attempts = self.config.max_retry_attempts,
                    error = %e,
                    "email delivery failed"
                );
                JobOutcome::failure_with(
                    format!("delivery to {} failed: {e}", request.to),
                    e,
                )
            }
        }
    }

    /// Sends a bulk request as fixed-size batches with a throttle delay
    /// between them.
    ///
    /// Items are independent: one failure aborts neither its batch nor later
    /// batches, and the report always carries one entry per input request,
    /// in input order.
    pub async fn send_bulk(&self, requests: &[EmailRequest]) -> BulkReport {
        let mut results = Vec::with_capacity(requests.len());
        let batch_size = self.config.bulk_batch_size.max(1);
        let batch_count = requests.len().div_ceil(batch_size);

        for (index, batch) in requests.chunks(batch_size).enumerate() {
            if index > 0 && !self.config.bulk_batch_delay.is_zero() {
                tokio::time::sleep(self.config.bulk_batch_delay).await;
            }

            debug!(
                batch = index + 1,
                of = batch_count,
                size = batch.len(),
                "sending email batch"
            );

            for request in batch {
                let outcome = self.send(request).await;
                results.push(SendReport {
                    recipient: request.to.clone(),
                    outcome,
                });
            }
        }

        let report = BulkReport { results };
        info!(
            total = report.len(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            status = ?report.status(),
            "bulk email send complete"
        );
        report
    }

    fn validate(&self, request: &EmailRequest) -> Result<(), String> {
        if request.to.trim().is_empty() {
            return Err("recipient address is empty".to_string());
        }
        if request.subject.trim().is_empty() {
            return Err("subject is empty".to_string());
        }

        let Some(domain) = domain_of(&request.to) else {
            return Err(format!("malformed recipient address: {}", request.to));
        };

        if !self.config.allowed_domains.is_empty()
            && !self
                .config
                .allowed_domains
                .iter()
                .any(|d| d.eq_ignore_ascii_case(&domain))
        {
            return Err(format!("recipient domain {domain} is not on the allow-list"));
        }

        if self
            .config
            .blocked_domains
            .iter()
            .any(|d| d.eq_ignore_ascii_case(&domain))
        {
            return Err(format!("recipient domain {domain} is blocked"));
        }

        Ok(())
    }
}

#[async_trait]
impl<P: EmailProvider + 'static> JobHandler<EmailJob> for EmailService<P> {
    fn kind(&self) -> &'static str {
        "email"
    }

    async fn handle(&self, job: EmailJob) -> JobOutcome {
        match job {
            EmailJob::Single(request) => self.send(&request).await,
            EmailJob::Bulk(requests) => {
                let report = self.send_bulk(&requests).await;
                match report.status() {
                    BulkStatus::AllSucceeded => JobOutcome::Success,
                    BulkStatus::AllFailed => JobOutcome::failure(format!(
                        "all {} emails in bulk send failed",
                        report.len()
                    )),
                    BulkStatus::Partial => JobOutcome::failure(format!(
                        "{} of {} emails in bulk send failed",
                        report.failed(),
                        report.len()
                    )),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::email::MockEmailProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn fast_config() -> EmailConfig {
        EmailConfig {
            retry_delay: Duration::from_millis(1),
            bulk_batch_delay: Duration::from_millis(1),
            ..EmailConfig::default()
        }
    }

    fn request(to: &str) -> EmailRequest {
        EmailRequest::new(to, "Subject", "Body")
    }

    #[tokio::test]
    async fn test_send_success() {
        let mut provider = MockEmailProvider::new();
        provider.expect_send().times(1).returning(|_| Ok(()));

        let service = EmailService::new(fast_config(), Arc::new(provider));
        assert!(service.send(&request("user@example.com")).await.is_success());
    }

    #[tokio::test]
    async fn test_empty_recipient_skips_provider() {
        let mut provider = MockEmailProvider::new();
        provider.expect_send().times(0);

        let service = EmailService::new(fast_config(), Arc::new(provider));
        let outcome = service.send(&request("")).await;

        assert_eq!(outcome.reason(), Some("recipient address is empty"));
    }

    #[tokio::test]
    async fn test_empty_subject_skips_provider() {
        let mut provider = MockEmailProvider::new();
        provider.expect_send().times(0);

        let service = EmailService::new(fast_config(), Arc::new(provider));
        let mut req = request("user@example.com");
        req.subject = "   ".to_string();

        let outcome = service.send(&req).await;
        assert_eq!(outcome.reason(), Some("subject is empty"));
    }

    #[tokio::test]
    async fn test_allow_list_blocks_other_domains() {
        let mut provider = MockEmailProvider::new();
        provider.expect_send().times(0);

        let config = EmailConfig {
            allowed_domains: vec!["example.com".to_string()],
            ..fast_config()
        };
        let service = EmailService::new(config, Arc::new(provider));

        let outcome = service.send(&request("user@other.com")).await;
        assert!(!outcome.is_success());
        assert!(outcome.reason().unwrap().contains("allow-list"));
    }

    #[tokio::test]
    async fn test_allow_list_passes_matching_domain() {
        let mut provider = MockEmailProvider::new();
        provider.expect_send().times(1).returning(|_| Ok(()));

        let config = EmailConfig {
            allowed_domains: vec!["example.com".to_string()],
            ..fast_config()
        };
        let service = EmailService::new(config, Arc::new(provider));

        assert!(service.send(&request("user@Example.COM")).await.is_success());
    }

    #[tokio::test]
    async fn test_deny_list_blocks_domain() {
        let mut provider = MockEmailProvider::new();
        provider.expect_send().times(0);

        let config = EmailConfig {
            blocked_domains: vec!["spam.example".to_string()],
            ..fast_config()
        };
        let service = EmailService::new(config, Arc::new(provider));

        let outcome = service.send(&request("user@spam.example")).await;
        assert!(outcome.reason().unwrap().contains("blocked"));
    }

    #[tokio::test]
    async fn test_sending_disabled_skips_provider_and_succeeds() {
        let mut provider = MockEmailProvider::new();
        provider.expect_send().times(0);

        let config = EmailConfig {
            sending_enabled: false,
            ..fast_config()
        };
        let service = EmailService::new(config, Arc::new(provider));

        assert!(service.send(&request("user@example.com")).await.is_success());
    }

    #[tokio::test]
    async fn test_transient_failure_retried_to_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);

        let mut provider = MockEmailProvider::new();
        provider.expect_send().times(3).returning(move |_| {
            if seen.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(ProviderError::Transient("throttled".to_string()))
            } else {
                Ok(())
            }
        });

        let service = EmailService::new(fast_config(), Arc::new(provider));
        let outcome = service.send(&request("user@example.com")).await;

        assert!(outcome.is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_transient_failure_exhausts_attempts() {
        let mut provider = MockEmailProvider::new();
        provider
            .expect_send()
            .times(3)
            .returning(|_| Err(ProviderError::Transient("down".to_string())));

        let service = EmailService::new(fast_config(), Arc::new(provider));
        let outcome = service.send(&request("user@example.com")).await;

        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn test_permanent_failure_not_retried() {
        let mut provider = MockEmailProvider::new();
        provider
            .expect_send()
            .times(1)
            .returning(|_| Err(ProviderError::Permanent("mailbox does not exist".to_string())));

        let service = EmailService::new(fast_config(), Arc::new(provider));
        let outcome = service.send(&request("user@example.com")).await;

        assert!(!outcome.is_success());
    }

    #[tokio::test(start_paused = true)]
    async fn test_bulk_batching_and_throttle() {
        let mut provider = MockEmailProvider::new();
        provider.expect_send().times(5).returning(|_| Ok(()));

        let config = EmailConfig {
            bulk_batch_size: 2,
            bulk_batch_delay: Duration::from_millis(100),
            ..EmailConfig::default()
        };
        let service = EmailService::new(config, Arc::new(provider));

        let requests: Vec<_> = (0..5)
            .map(|i| request(&format!("user{i}@example.com")))
            .collect();

        let started = tokio::time::Instant::now();
        let report = service.send_bulk(&requests).await;

        // 3 batches (2/2/1) means exactly two inter-batch delays.
        assert_eq!(report.len(), 5);
        assert_eq!(report.status(), BulkStatus::AllSucceeded);
        assert_eq!(started.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_bulk_one_failure_does_not_abort_rest() {
        let mut provider = MockEmailProvider::new();
        provider
            .expect_send()
            .times(4)
            .returning(|req: &EmailRequest| {
                if req.to == "user1@example.com" {
                    Err(ProviderError::Permanent("rejected".to_string()))
                } else {
                    Ok(())
                }
            });

        let config = EmailConfig {
            bulk_batch_size: 2,
            bulk_batch_delay: Duration::from_millis(1),
            ..fast_config()
        };
        let service = EmailService::new(config, Arc::new(provider));

        let requests: Vec<_> = (0..4)
            .map(|i| request(&format!("user{i}@example.com")))
            .collect();

        let report = service.send_bulk(&requests).await;
        assert_eq!(report.status(), BulkStatus::Partial);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.results[1].recipient, "user1@example.com");
        assert!(!report.results[1].outcome.is_success());
    }

    #[tokio::test]
    async fn test_handle_reduces_bulk_report() {
        let mut provider = MockEmailProvider::new();
        provider
            .expect_send()
            .times(2)
            .returning(|_| Err(ProviderError::Permanent("rejected".to_string())));

        let service = EmailService::new(fast_config(), Arc::new(provider));
        let job = EmailJob::Bulk(vec![
            request("a@example.com"),
            request("b@example.com"),
        ]);

        let outcome = service.handle(job).await;
        assert!(outcome.reason().unwrap().contains("all 2 emails"));
    }
}
