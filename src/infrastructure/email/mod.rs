//! Outbound email transport.

pub mod provider;
pub mod smtp;

pub use provider::EmailProvider;
pub use smtp::{SmtpConfig, SmtpEmailProvider};

#[cfg(test)]
pub use provider::MockEmailProvider;
