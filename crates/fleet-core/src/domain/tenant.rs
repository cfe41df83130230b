//! Tenant domain entities

use fleet_shared::CustomerId;
use serde::{Deserialize, Serialize};

/// Customer-facing domain settings. One row per hostname; the hostname is
/// globally unique and maps the request origin to its owning tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantConfig {
    pub id: i64,
    pub domain: String,
    pub customer_id: CustomerId,
    pub site_name: Option<String>,
    pub language: Option<String>,
}

/// Tenant entity: an organizational account owning vehicles and drivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
}
