//! Request middleware: authentication, tenant context, activity tracking

pub mod auth;
pub mod tenant;
pub mod activity;

pub use auth::require_auth;
pub use tenant::tenant_context;
pub use activity::track_activity;
