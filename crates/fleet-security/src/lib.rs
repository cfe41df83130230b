//! # Fleet Security
//!
//! JWT principal tokens and the user-activity tracker.

pub mod jwt;
pub mod activity;

pub use jwt::{Claims, JwtError, JwtService};
pub use activity::{ActivityStatus, ActivityTracker};
