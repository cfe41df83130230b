//! Access decision types

use fleet_shared::CustomerId;
use serde::{Deserialize, Serialize};

use crate::domain::TenantConfig;

/// Why an access check passed or failed. Always populated; written to the
/// audit log, never echoed verbatim to production callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessReason {
    SuperAdmin,
    DirectMatch,
    GrantedAccess,
    /// Unconfigured domain allowed through outside production.
    DevelopmentMode,
    /// A grant edge exists but its validity window has passed. Denied at the
    /// interface like any other denial; the distinction is for logs.
    GrantExpired,
    Denied,
}

impl AccessReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessReason::SuperAdmin => "Super Admin",
            AccessReason::DirectMatch => "Customer match",
            AccessReason::GrantedAccess => "Granted access",
            AccessReason::DevelopmentMode => "Development mode",
            AccessReason::GrantExpired => "Grant expired",
            AccessReason::Denied => "User customer does not match domain customer",
        }
    }
}

/// Outcome of a single access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    pub granted: bool,
    pub reason: AccessReason,
}

impl AccessDecision {
    pub fn granted(reason: AccessReason) -> Self {
        Self { granted: true, reason }
    }

    pub fn denied(reason: AccessReason) -> Self {
        Self { granted: false, reason }
    }
}

/// The tenant a request is ultimately authorized to operate against, bound
/// for the remainder of request handling.
#[derive(Debug, Clone)]
pub struct EffectiveTenant {
    pub customer_id: CustomerId,
    /// Domain settings when the request's origin resolved to a configured
    /// tenant; absent in the development fail-open path.
    pub tenant: Option<TenantConfig>,
    pub reason: AccessReason,
}
