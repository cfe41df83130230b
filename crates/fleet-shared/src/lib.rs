//! # Fleet Shared
//!
//! Shared types, configuration, telemetry, and time utilities for the
//! FleetConnect application.

pub mod constants;
pub mod types;
pub mod time;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
