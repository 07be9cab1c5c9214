//! SMTP email provider backed by lettre.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::env;
use tracing::debug;

use super::provider::EmailProvider;
use crate::domain::email::EmailRequest;
use crate::error::ProviderError;

/// SMTP transport settings.
///
/// Loaded separately from [`crate::config::JobsConfig`] because only the
/// SMTP provider needs them; a deployment using a different provider
/// implementation sets none of these.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender address used for every outgoing message.
    pub from: String,
}

impl SmtpConfig {
    /// Loads SMTP settings from environment variables.
    ///
    /// `SMTP_HOST` and `SMTP_FROM` are required; `SMTP_PORT` defaults to 587,
    /// `SMTP_USER`/`SMTP_PASSWORD` are optional (unauthenticated relay).
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing.
    pub fn from_env() -> Result<Self> {
        let host = env::var("SMTP_HOST").context("SMTP_HOST must be set")?;
        let port = env::var("SMTP_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(587);
        let username = env::var("SMTP_USER").ok().filter(|v| !v.is_empty());
        let password = env::var("SMTP_PASSWORD").ok().filter(|v| !v.is_empty());
        let from = env::var("SMTP_FROM").context("SMTP_FROM must be set")?;

        Ok(Self {
            host,
            port,
            username,
            password,
            from,
        })
    }
}

/// [`EmailProvider`] implementation speaking SMTP with STARTTLS.
pub struct SmtpEmailProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailProvider {
    /// Builds the transport from configuration.
    ///
    /// Construction does not touch the network or the async runtime; the
    /// SMTP connection is opened per send.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay host is invalid or `from` is not a
    /// valid mailbox address.
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let from: Mailbox = config
            .from
            .parse()
            .with_context(|| format!("invalid SMTP_FROM address: {}", config.from))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .with_context(|| format!("invalid SMTP relay host: {}", config.host))?
            .port(config.port);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        debug!(host = %config.host, port = config.port, "SMTP transport configured");

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl EmailProvider for SmtpEmailProvider {
    async fn send(&self, request: &EmailRequest) -> Result<(), ProviderError> {
        let to: Mailbox = request
            .to
            .parse()
            .map_err(|e| ProviderError::Permanent(format!("invalid recipient address: {e}")))?;

        let content_type = if request.html {
            ContentType::TEXT_HTML
        } else {
            ContentType::TEXT_PLAIN
        };

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(request.subject.clone())
            .header(content_type)
            .body(request.body.clone())
            .map_err(|e| ProviderError::Permanent(format!("failed to build message: {e}")))?;

        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| {
                if e.is_permanent() {
                    ProviderError::Permanent(e.to_string())
                } else {
                    ProviderError::Transient(e.to_string())
                }
            })
    }
}
