//! Authenticated principal

use fleet_shared::{CustomerId, UserId};
use serde::{Deserialize, Serialize};

/// The identity a request acts as, derived from a verified session or
/// bearer token. Lives for the session; `selected_customer_id` is only a
/// hint of a previous switch and is re-validated on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub username: String,
    /// Home tenant. Super admins have none.
    pub primary_customer_id: Option<CustomerId>,
    /// Tenant currently being acted as, when the user explicitly switched.
    pub selected_customer_id: Option<CustomerId>,
    pub is_dashboard_user: bool,
}

impl Principal {
    pub fn new(user_id: UserId, username: impl Into<String>, primary: Option<CustomerId>) -> Self {
        Self {
            user_id,
            username: username.into(),
            primary_customer_id: primary,
            selected_customer_id: None,
            is_dashboard_user: false,
        }
    }

    /// The tenant this principal is currently operating as, before any
    /// authorization check: explicit selection wins over the home tenant.
    pub fn acting_customer_id(&self) -> Option<CustomerId> {
        self.selected_customer_id.or(self.primary_customer_id)
    }
}
