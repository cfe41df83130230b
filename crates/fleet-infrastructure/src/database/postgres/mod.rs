//! PostgreSQL repository implementations

pub mod drive_time_repo_impl;
pub mod tenant_repo_impl;
pub mod access_repo_impl;

pub use drive_time_repo_impl::PgDriveTimeRepository;
pub use tenant_repo_impl::PgTenantRepository;
pub use access_repo_impl::PgAccessRepository;
