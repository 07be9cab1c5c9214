//! Infrastructure layer: concrete collaborator implementations.
//!
//! - [`email`] - SMTP transport behind the [`email::EmailProvider`] trait
//! - [`geo`] - Geolocation behind the [`geo::GeoLocator`] trait
//!
//! Click and usage repositories have no implementation here; the host
//! application owns the database and implements
//! [`crate::domain::repositories`] against it.

pub mod email;
pub mod geo;
