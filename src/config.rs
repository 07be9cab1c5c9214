//! Job subsystem configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the
//! dispatchers are spawned.
//!
//! ## Recognized Variables
//!
//! - `EMAIL_SENDING_ENABLED` - Master switch; when `false` every send is
//!   skipped and logged (default: `true`)
//! - `EMAIL_MAX_RETRY_ATTEMPTS` - Total delivery attempts per email,
//!   including the first (default: 3)
//! - `EMAIL_RETRY_DELAY_MS` - Fixed delay between attempts (default: 1000)
//! - `BULK_EMAIL_BATCH_SIZE` - Emails per bulk sub-batch (default: 50)
//! - `BULK_EMAIL_BATCH_DELAY_MS` - Throttle delay between sub-batches
//!   (default: 2000)
//! - `LOG_EMAIL_CONTENT` - Include email bodies in debug logs (default:
//!   `false`)
//! - `EMAIL_ALLOWED_DOMAINS` - Comma-separated allow-list; empty means all
//!   domains pass
//! - `EMAIL_BLOCKED_DOMAINS` - Comma-separated deny-list, checked after the
//!   allow-list
//!
//! The retry policy is deliberately fixed-attempts/fixed-delay, not
//! exponential backoff.
//!
//! SMTP transport settings live with the provider implementation, see
//! [`crate::infrastructure::email::SmtpConfig`].

use anyhow::Result;
use std::env;
use std::time::Duration;

/// Email delivery behavior for [`crate::application::services::EmailService`].
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub sending_enabled: bool,
    /// Total attempts per email, including the first. Minimum 1.
    pub max_retry_attempts: usize,
    /// Fixed delay between attempts.
    pub retry_delay: Duration,
    pub bulk_batch_size: usize,
    /// Throttle delay inserted between bulk sub-batches.
    pub bulk_batch_delay: Duration,
    /// When true, email bodies are written to debug logs.
    pub log_email_content: bool,
    /// Recipient domains allowed to receive mail; empty means no restriction.
    pub allowed_domains: Vec<String>,
    /// Recipient domains always rejected, checked after the allow-list.
    pub blocked_domains: Vec<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            sending_enabled: true,
            max_retry_attempts: 3,
            retry_delay: Duration::from_millis(1000),
            bulk_batch_size: 50,
            bulk_batch_delay: Duration::from_millis(2000),
            log_email_content: false,
            allowed_domains: Vec::new(),
            blocked_domains: Vec::new(),
        }
    }
}

/// Top-level configuration for the job subsystem.
#[derive(Debug, Clone, Default)]
pub struct JobsConfig {
    pub email: EmailConfig,
}

impl JobsConfig {
    /// Loads configuration from environment variables.
    ///
    /// Missing variables fall back to defaults; malformed numeric and
    /// boolean values are ignored in favor of the default, matching how the
    /// rest of the service treats optional tuning knobs.
    pub fn from_env() -> Self {
        let email = EmailConfig {
            sending_enabled: parse_bool(env::var("EMAIL_SENDING_ENABLED").ok(), true),
            max_retry_attempts: parse_number(env::var("EMAIL_MAX_RETRY_ATTEMPTS").ok(), 3),
            retry_delay: Duration::from_millis(parse_number(
                env::var("EMAIL_RETRY_DELAY_MS").ok(),
                1000,
            )),
            bulk_batch_size: parse_number(env::var("BULK_EMAIL_BATCH_SIZE").ok(), 50),
            bulk_batch_delay: Duration::from_millis(parse_number(
                env::var("BULK_EMAIL_BATCH_DELAY_MS").ok(),
                2000,
            )),
            log_email_content: parse_bool(env::var("LOG_EMAIL_CONTENT").ok(), false),
            allowed_domains: parse_domain_list(env::var("EMAIL_ALLOWED_DOMAINS").ok()),
            blocked_domains: parse_domain_list(env::var("EMAIL_BLOCKED_DOMAINS").ok()),
        };

        Self { email }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `max_retry_attempts` is 0 or greater than 10
    /// - `bulk_batch_size` is 0 or greater than 1000
    /// - either delay exceeds 5 minutes
    pub fn validate(&self) -> Result<()> {
        let email = &self.email;

        if email.max_retry_attempts == 0 {
            anyhow::bail!("EMAIL_MAX_RETRY_ATTEMPTS must be at least 1");
        }
        if email.max_retry_attempts > 10 {
            anyhow::bail!(
                "EMAIL_MAX_RETRY_ATTEMPTS is too large (max: 10), got {}",
                email.max_retry_attempts
            );
        }

        if email.bulk_batch_size == 0 {
            anyhow::bail!("BULK_EMAIL_BATCH_SIZE must be at least 1");
        }
        if email.bulk_batch_size > 1000 {
            anyhow::bail!(
                "BULK_EMAIL_BATCH_SIZE is too large (max: 1000), got {}",
                email.bulk_batch_size
            );
        }

        const MAX_DELAY: Duration = Duration::from_secs(300);
        if email.retry_delay > MAX_DELAY {
            anyhow::bail!(
                "EMAIL_RETRY_DELAY_MS is too large (max: 300000), got {}",
                email.retry_delay.as_millis()
            );
        }
        if email.bulk_batch_delay > MAX_DELAY {
            anyhow::bail!(
                "BULK_EMAIL_BATCH_DELAY_MS is too large (max: 300000), got {}",
                email.bulk_batch_delay.as_millis()
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        let email = &self.email;
        tracing::info!("Job subsystem configuration:");
        tracing::info!("  Email sending: {}", if email.sending_enabled { "enabled" } else { "disabled" });
        tracing::info!(
            "  Retry: {} attempts, {}ms fixed delay",
            email.max_retry_attempts,
            email.retry_delay.as_millis()
        );
        tracing::info!(
            "  Bulk: batches of {}, {}ms between batches",
            email.bulk_batch_size,
            email.bulk_batch_delay.as_millis()
        );
        if !email.allowed_domains.is_empty() {
            tracing::info!("  Allowed domains: {}", email.allowed_domains.join(", "));
        }
        if !email.blocked_domains.is_empty() {
            tracing::info!("  Blocked domains: {}", email.blocked_domains.join(", "));
        }
    }
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    match value.as_deref() {
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => true,
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => false,
        // Unrecognized values fall back to the default, like parse_number.
        _ => default,
    }
}

fn parse_number<N: std::str::FromStr>(value: Option<String>, default: N) -> N {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Splits a comma-separated domain list, trimming whitespace and lowercasing.
fn parse_domain_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|d| d.trim().to_ascii_lowercase())
                .filter(|d| !d.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn load_from_env() -> Result<JobsConfig> {
    let config = JobsConfig::from_env();
    config.validate()?;
    Ok(config)
}
