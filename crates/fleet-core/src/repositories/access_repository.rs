//! Access repository trait (port)
//!
//! Read access to the permission-assignment store and the
//! customer-to-customer grant graph.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fleet_shared::{CustomerId, UserId};

use crate::domain::Customer;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessRepository: Send + Sync {
    /// Number of permission assignments the user holds strictly below
    /// `level`. Super-admin eligibility is `count > 0` below level 10.
    async fn count_permissions_below(
        &self,
        user_id: UserId,
        level: i32,
    ) -> Result<i64, DomainError>;

    /// Grant edges from -> to that are active and valid at `at`.
    async fn count_effective_grants(
        &self,
        from: CustomerId,
        to: CustomerId,
        at: DateTime<Utc>,
    ) -> Result<i64, DomainError>;

    /// Grant edges from -> to regardless of active flag or validity window.
    /// Lets a denial be logged as an expired grant rather than no grant.
    async fn count_grant_edges(
        &self,
        from: CustomerId,
        to: CustomerId,
    ) -> Result<i64, DomainError>;

    /// Customers reachable from `from` via grants active and valid at `at`.
    async fn list_effective_grants(
        &self,
        from: CustomerId,
        at: DateTime<Utc>,
    ) -> Result<Vec<Customer>, DomainError>;
}
