//! # Fleet Core - Domain Module
//!
//! Domain entities for the FleetConnect backend.

pub mod drive_time;
pub mod tenant;
pub mod grant;
pub mod principal;
pub mod access;

// Re-export all entities
pub use drive_time::{ComplianceResult, DailyDriveRecord, DriveTimeRuleSet, DriveTimeSnapshot};
pub use tenant::{Customer, TenantConfig};
pub use grant::CustomerGrant;
pub use principal::Principal;
pub use access::{AccessDecision, AccessReason, EffectiveTenant};
