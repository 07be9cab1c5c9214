//! Data access trait definitions.

pub mod click_repository;
pub mod usage_repository;

pub use click_repository::ClickRepository;
pub use usage_repository::UsageRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use usage_repository::MockUsageRepository;
