//! Tenant repository trait (port)

use async_trait::async_trait;
use fleet_shared::CustomerId;

use crate::domain::{Customer, TenantConfig};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenantRepository: Send + Sync {
    /// Domain settings for a hostname. Hostnames are globally unique.
    async fn find_by_domain(&self, domain: &str) -> Result<Option<TenantConfig>, DomainError>;

    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>, DomainError>;
}
