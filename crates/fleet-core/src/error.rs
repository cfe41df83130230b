//! Domain errors

use fleet_shared::time::TimeError;
use fleet_shared::CustomerId;
use thiserror::Error;

use crate::domain::AccessReason;

#[derive(Error, Debug)]
pub enum DomainError {
    /// No drive-time rule set configured for the tenant. The evaluator never
    /// falls back to default limits.
    #[error("Drive time rules not configured for customer {0}")]
    ComplianceRulesMissing(CustomerId),

    #[error("Driver not found")]
    DriverNotFound,

    #[error("Domain not configured: {0}")]
    DomainNotConfigured(String),

    #[error("Access denied: {}", .0.as_str())]
    AccessDenied(AccessReason),

    #[error("Customer not found")]
    CustomerNotFound,

    #[error(transparent)]
    Time(#[from] TimeError),

    #[error("Invalid customer id in stored data: {0}")]
    InvalidStoredId(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
