//! Application-wide constants

/// Seconds in one calendar day; the rest budget a daily drive record is
/// measured against.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Trailing window of daily drive records loaded for compliance evaluation.
/// Three weeks is enough to cover the current and previous ISO week under
/// any week-start alignment.
pub const DRIVE_RECORD_WINDOW_DAYS: i64 = 21;

/// Permission levels strictly below this value mark a super admin.
pub const SUPER_ADMIN_PERMISSION_LEVEL: i32 = 10;

/// Hostname assumed when a request carries no usable Origin/Referer header.
pub const DEFAULT_DOMAIN: &str = "localhost";

pub const DEFAULT_INACTIVITY_TIMEOUT_MINUTES: i64 = 30;
pub const DASHBOARD_INACTIVITY_TIMEOUT_MINUTES: i64 = 1440;
