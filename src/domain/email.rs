//! Email job payloads.

use serde_json::Value;

/// A single outbound email request.
///
/// Created by producer code (account verification, password reset, usage
/// notifications) and carried through the email queue to the delivery
/// handler. The `metadata` field is free-form context included in logs,
/// never sent to the recipient.
#[derive(Debug, Clone)]
pub struct EmailRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
    /// When true the body is sent as `text/html`, otherwise `text/plain`.
    pub html: bool,
    pub metadata: Option<Value>,
}

impl EmailRequest {
    /// Creates a plain-text email request.
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            html: false,
            metadata: None,
        }
    }

    /// Marks the body as HTML.
    pub fn with_html(mut self) -> Self {
        self.html = true;
        self
    }

    /// Attaches free-form metadata for logging.
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Payload of the email queue.
///
/// Bulk campaigns ride the same queue as single sends; the delivery handler
/// partitions a `Bulk` job into throttled batches itself.
#[derive(Debug, Clone)]
pub enum EmailJob {
    Single(EmailRequest),
    Bulk(Vec<EmailRequest>),
}
