//! Job handlers invoked by the dispatchers.

pub mod click_service;
pub mod email_service;

pub use click_service::ClickService;
pub use email_service::EmailService;
