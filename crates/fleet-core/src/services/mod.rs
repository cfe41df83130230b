//! Domain services (business logic)

pub mod compliance;
pub mod access;
pub mod tenant_context;

pub use compliance::{aggregate_snapshot, evaluate, ComplianceReport, ComplianceService};
pub use access::{extract_domain, AccessService};
pub use tenant_context::TenantContext;
