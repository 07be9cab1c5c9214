//! Domain layer: job payloads, outcome types, and collaborator contracts.
//!
//! # Architecture
//!
//! - [`email`] - Email job payloads
//! - [`click`] - Click-tracking job payloads
//! - [`geo`] - Geolocation context
//! - [`outcome`] - Job and batch outcome values
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Expected failures are outcome values, never propagated errors
//! - Repository traits define contracts implemented by the host application
//! - Payloads are owned by exactly one party at a time: the producer until
//!   enqueue, the queue until dequeue, the handler invocation until it returns

pub mod click;
pub mod email;
pub mod geo;
pub mod outcome;
pub mod repositories;

pub use click::{ClickJob, NewClickRecord, TrackingData, UtmParams};
pub use email::{EmailJob, EmailRequest};
pub use geo::GeoContext;
pub use outcome::{BulkReport, BulkStatus, JobOutcome, SendReport};
