// ============================================================================
// Fleet Core - Drive Time Entities
// File: crates/fleet-core/src/domain/drive_time.rs
// Description: Tachograph rule sets, daily records, and computed snapshots
// ============================================================================

use chrono::NaiveDate;
use fleet_shared::DriverId;
use serde::{Deserialize, Serialize};

/// Per-tenant drive-time compliance configuration (EU tachograph rules).
/// All durations are whole seconds; exactly one active rule set per tenant.
/// Read-only to the compliance engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveTimeRuleSet {
    /// Standard daily drive limit (typically 9h).
    pub standard_daily_drive_time: i64,
    /// Extended daily drive limit (typically 10h), usable a limited number
    /// of days per week.
    pub extended_drive_time: i64,
    /// Weekly drive cap (typically 56h).
    pub max_drive_time_weekly: i64,
    /// Rolling two-week drive cap (typically 90h).
    pub max_drive_time_bi_weekly: i64,
    /// Permitted extended-drive days per week (typically 2).
    pub count_extended_drive_time_weekly: i64,
    /// Minimum daily rest between drive periods (typically 11h).
    pub min_rest_between_drive_daily: i64,
    /// Permitted reduced daily rests per week (typically 3).
    pub count_short_rest_weekly: i64,
    /// Consecutive working days before a weekly rest is due.
    pub consecutive_days_before_rest: i64,
}

/// One row per (driver, calendar date), appended by the tachograph ingestion
/// process and immutable afterwards. Durations in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyDriveRecord {
    pub driver_id: DriverId,
    pub date: NaiveDate,
    pub drive_seconds: i64,
    pub work_seconds: i64,
    pub available_seconds: i64,
}

/// Aggregate drive figures for one driver at one instant. Ephemeral:
/// recomputed from the daily records on every query, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveTimeSnapshot {
    pub drive_today: i64,
    pub this_week_drive: i64,
    pub last_week_drive: i64,
    pub used_extended_drive_days_this_week: i64,
    pub used_short_rest_days_this_week: i64,
    pub working_days_this_week: i64,
}

impl DriveTimeSnapshot {
    /// Rolling two-week total: current plus previous ISO week.
    pub fn bi_weekly_drive(&self) -> i64 {
        self.this_week_drive + self.last_week_drive
    }
}

/// Outcome of evaluating a snapshot against a rule set. Remaining allowances
/// are clamped at zero; the infringement count is the number of independent
/// rule violations (today / this week / last week / bi-weekly).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub infringements: u32,
    /// Today's applicable limit: extended while extended-drive days remain,
    /// standard otherwise.
    pub max_drive_time_today: i64,
    /// This week's applicable cap: the weekly limit reduced by any bi-weekly
    /// overhang from last week. May be negative when last week alone already
    /// exceeded the bi-weekly cap.
    pub this_week_max_drive_time: i64,
    pub remaining_drive_today: i64,
    pub remaining_drive_weekly: i64,
    pub remaining_drive_bi_weekly: i64,
}

impl ComplianceResult {
    pub fn has_infringements(&self) -> bool {
        self.infringements > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bi_weekly_total_sums_both_weeks() {
        let snapshot = DriveTimeSnapshot {
            this_week_drive: 10 * 3600,
            last_week_drive: 40 * 3600,
            ..Default::default()
        };
        assert_eq!(snapshot.bi_weekly_drive(), 50 * 3600);
    }
}
