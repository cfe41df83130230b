//! User activity tracking with inactivity timeout
//!
//! Keyed store (user id -> last-activity record) owned by one tracker
//! instance with explicit TTL eviction. Dashboard users get a much longer
//! timeout than interactive users.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};
use fleet_shared::UserId;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct ActivityRecord {
    last_activity: DateTime<Utc>,
    is_dashboard_user: bool,
}

/// Result of an inactivity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityStatus {
    Active,
    /// No recorded activity; treated as active (first request).
    Unknown,
    TimedOut,
}

pub struct ActivityTracker {
    records: RwLock<HashMap<UserId, ActivityRecord>>,
    default_timeout: Duration,
    dashboard_timeout: Duration,
}

impl ActivityTracker {
    pub fn new(default_timeout_minutes: i64, dashboard_timeout_minutes: i64) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            default_timeout: Duration::minutes(default_timeout_minutes),
            dashboard_timeout: Duration::minutes(dashboard_timeout_minutes),
        }
    }

    // A poisoned lock only means a panic mid-insert; the map stays usable.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<UserId, ActivityRecord>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<UserId, ActivityRecord>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Record activity for a user.
    pub fn touch(&self, user_id: UserId, is_dashboard_user: bool, at: DateTime<Utc>) {
        let mut records = self.write();
        records.insert(
            user_id,
            ActivityRecord {
                last_activity: at,
                is_dashboard_user,
            },
        );
    }

    /// Check whether the user's session has gone idle past its limit. A
    /// timed-out entry is removed so the next authenticated request starts
    /// a fresh window.
    pub fn check(&self, user_id: UserId, at: DateTime<Utc>) -> ActivityStatus {
        let timed_out = {
            let records = self.read();
            match records.get(&user_id) {
                None => return ActivityStatus::Unknown,
                Some(record) => at - record.last_activity > self.limit_for(record),
            }
        };

        if timed_out {
            debug!("User {} timed out due to inactivity", user_id);
            self.write().remove(&user_id);
            ActivityStatus::TimedOut
        } else {
            ActivityStatus::Active
        }
    }

    /// Seconds until the user's session would time out, if known.
    pub fn time_until_timeout(&self, user_id: UserId, at: DateTime<Utc>) -> Option<i64> {
        let records = self.read();
        records.get(&user_id).map(|record| {
            let remaining = self.limit_for(record) - (at - record.last_activity);
            remaining.num_seconds().max(0)
        })
    }

    /// Drop every record older than its timeout. Called periodically so the
    /// map does not grow with logged-out users.
    pub fn evict_expired(&self, at: DateTime<Utc>) {
        self.write()
            .retain(|_, record| at - record.last_activity <= self.limit_for(record));
    }

    fn limit_for(&self, record: &ActivityRecord) -> Duration {
        if record.is_dashboard_user {
            self.dashboard_timeout
        } else {
            self.default_timeout
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 12, 12, minute, 0).unwrap()
    }

    #[test]
    fn active_within_timeout() {
        let tracker = ActivityTracker::new(30, 1440);
        tracker.touch(UserId(1), false, at(0));
        assert_eq!(tracker.check(UserId(1), at(29)), ActivityStatus::Active);
    }

    #[test]
    fn times_out_past_limit_and_forgets() {
        let tracker = ActivityTracker::new(30, 1440);
        tracker.touch(UserId(1), false, at(0));
        assert_eq!(tracker.check(UserId(1), at(31)), ActivityStatus::TimedOut);
        // Entry was evicted; next check starts unknown.
        assert_eq!(tracker.check(UserId(1), at(32)), ActivityStatus::Unknown);
    }

    #[test]
    fn dashboard_users_get_the_long_timeout() {
        let tracker = ActivityTracker::new(30, 1440);
        tracker.touch(UserId(2), true, at(0));
        assert_eq!(tracker.check(UserId(2), at(45)), ActivityStatus::Active);
    }

    #[test]
    fn unknown_user_is_not_timed_out() {
        let tracker = ActivityTracker::new(30, 1440);
        assert_eq!(tracker.check(UserId(9), at(0)), ActivityStatus::Unknown);
    }

    #[test]
    fn eviction_clears_stale_records_only() {
        let tracker = ActivityTracker::new(30, 1440);
        tracker.touch(UserId(1), false, at(0));
        tracker.touch(UserId(2), false, at(25));
        tracker.evict_expired(at(40));
        assert_eq!(tracker.check(UserId(1), at(40)), ActivityStatus::Unknown);
        assert_eq!(tracker.check(UserId(2), at(40)), ActivityStatus::Active);
    }

    #[test]
    fn reports_time_until_timeout() {
        let tracker = ActivityTracker::new(30, 1440);
        tracker.touch(UserId(1), false, at(0));
        assert_eq!(tracker.time_until_timeout(UserId(1), at(10)), Some(20 * 60));
        assert_eq!(tracker.time_until_timeout(UserId(9), at(10)), None);
    }
}
