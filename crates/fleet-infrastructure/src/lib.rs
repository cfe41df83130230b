//! # Fleet Infrastructure
//!
//! PostgreSQL implementations of the fleet-core repository ports.

pub mod database;

pub use database::{
    create_pool, PgAccessRepository, PgDriveTimeRepository, PgTenantRepository,
};
