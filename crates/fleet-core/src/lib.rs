//! # Fleet Core
//!
//! Domain entities, repository ports, and the two algorithmic services of
//! the FleetConnect backend: drive-time compliance evaluation and
//! tenant access resolution.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

pub use domain::*;
pub use error::DomainError;
