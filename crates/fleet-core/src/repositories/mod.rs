//! Repository traits (ports)

pub mod drive_time_repository;
pub mod tenant_repository;
pub mod access_repository;

pub use drive_time_repository::DriveTimeRepository;
pub use tenant_repository::TenantRepository;
pub use access_repository::AccessRepository;

#[cfg(test)]
pub use access_repository::MockAccessRepository;
#[cfg(test)]
pub use drive_time_repository::MockDriveTimeRepository;
#[cfg(test)]
pub use tenant_repository::MockTenantRepository;
