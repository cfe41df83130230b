// ============================================================================
// Fleet Core - Drive Time Compliance Service
// File: crates/fleet-core/src/services/compliance.rs
// ============================================================================
//! EU tachograph rule evaluation: aggregates a driver's daily drive records
//! into a snapshot, then checks the snapshot against the tenant's rule set.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use chrono::NaiveDate;
use fleet_shared::constants::{DRIVE_RECORD_WINDOW_DAYS, SECONDS_PER_DAY};
use fleet_shared::time::iso_week_of;
use fleet_shared::{CustomerId, DriverId};
use tracing::{debug, warn};

use crate::domain::{ComplianceResult, DailyDriveRecord, DriveTimeRuleSet, DriveTimeSnapshot};
use crate::error::DomainError;
use crate::repositories::DriveTimeRepository;

/// Snapshot + result + the rules they were computed under, as one unit for
/// the API layer.
#[derive(Debug, Clone)]
pub struct ComplianceReport {
    pub snapshot: DriveTimeSnapshot,
    pub result: ComplianceResult,
    pub rules: DriveTimeRuleSet,
}

/// Partition a driver's daily records into today / current ISO week /
/// previous ISO week and tally the week's special events.
///
/// The extended-drive threshold and minimum daily rest are passed in by the
/// caller; the aggregation itself is rule-agnostic. Pure function: safe to
/// run concurrently for different drivers.
pub fn aggregate_snapshot(
    records: &[DailyDriveRecord],
    today: NaiveDate,
    standard_daily_drive_time: i64,
    min_rest_between_drive_daily: i64,
) -> DriveTimeSnapshot {
    let this_week = iso_week_of(today);
    let last_week = iso_week_of(today - Duration::days(7));

    let mut snapshot = DriveTimeSnapshot::default();

    for record in records {
        let week = iso_week_of(record.date);

        if record.date == today {
            snapshot.drive_today += record.drive_seconds;
        }

        if week == this_week {
            snapshot.this_week_drive += record.drive_seconds;

            // Records are unique per (driver, date), so per-record counts
            // are distinct-date counts.
            if record.drive_seconds > standard_daily_drive_time {
                snapshot.used_extended_drive_days_this_week += 1;
            }
            let rest = SECONDS_PER_DAY
                - record.drive_seconds
                - record.work_seconds
                - record.available_seconds;
            if rest < min_rest_between_drive_daily {
                snapshot.used_short_rest_days_this_week += 1;
            }
            if record.drive_seconds > 0 {
                snapshot.working_days_this_week += 1;
            }
        } else if week == last_week {
            snapshot.last_week_drive += record.drive_seconds;
        }
    }

    snapshot
}

/// Check a snapshot against a rule set. The four infringement checks are
/// independent; each violated rule increments the count.
pub fn evaluate(snapshot: &DriveTimeSnapshot, rules: &DriveTimeRuleSet) -> ComplianceResult {
    let mut infringements = 0u32;

    if snapshot.bi_weekly_drive() > rules.max_drive_time_bi_weekly {
        infringements += 1;
    }

    if snapshot.last_week_drive > rules.max_drive_time_weekly {
        infringements += 1;
    }

    // Extended limit applies while the weekly extended-drive allowance has
    // days left; afterwards the standard limit is back in force.
    let max_drive_time_today =
        if snapshot.used_extended_drive_days_this_week < rules.count_extended_drive_time_weekly {
            rules.extended_drive_time
        } else {
            rules.standard_daily_drive_time
        };

    if snapshot.drive_today > max_drive_time_today {
        infringements += 1;
    }

    // This week's cap is the weekly limit, reduced by whatever last week
    // already consumed of the bi-weekly budget. A negative cap means last
    // week alone blew the bi-weekly budget; any driving this week then
    // counts as an infringement.
    let this_week_max_drive_time = rules
        .max_drive_time_weekly
        .min(rules.max_drive_time_bi_weekly - snapshot.last_week_drive);

    if snapshot.this_week_drive > this_week_max_drive_time {
        infringements += 1;
    }

    ComplianceResult {
        infringements,
        max_drive_time_today,
        this_week_max_drive_time,
        remaining_drive_today: (max_drive_time_today - snapshot.drive_today).max(0),
        remaining_drive_weekly: (this_week_max_drive_time - snapshot.this_week_drive).max(0),
        remaining_drive_bi_weekly: (rules.max_drive_time_bi_weekly - snapshot.bi_weekly_drive())
            .max(0),
    }
}

/// Drive-time compliance service: loads rules and the trailing record
/// window, then runs the pure aggregation and evaluation.
pub struct ComplianceService<R: DriveTimeRepository> {
    drive_time_repo: Arc<R>,
}

impl<R: DriveTimeRepository> ComplianceService<R> {
    pub fn new(drive_time_repo: Arc<R>) -> Self {
        Self { drive_time_repo }
    }

    /// Evaluate one driver's compliance under one tenant's rules, as of
    /// `at`. Fails with `ComplianceRulesMissing` when the tenant has no
    /// rule set; limits are never guessed.
    pub async fn driver_compliance(
        &self,
        driver_id: DriverId,
        customer_id: CustomerId,
        at: DateTime<Utc>,
    ) -> Result<ComplianceReport, DomainError> {
        let rules = self
            .drive_time_repo
            .find_rule_set(customer_id)
            .await?
            .ok_or_else(|| {
                warn!("No drive time rules configured for customer {}", customer_id);
                DomainError::ComplianceRulesMissing(customer_id)
            })?;

        let today = at.date_naive();
        let from = today - Duration::days(DRIVE_RECORD_WINDOW_DAYS);
        let records = self
            .drive_time_repo
            .find_daily_records(driver_id, from, today)
            .await?;

        debug!(
            "Evaluating compliance for driver {} over {} records",
            driver_id,
            records.len()
        );

        let snapshot = aggregate_snapshot(
            &records,
            today,
            rules.standard_daily_drive_time,
            rules.min_rest_between_drive_daily,
        );
        let result = evaluate(&snapshot, &rules);

        Ok(ComplianceReport {
            snapshot,
            result,
            rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockDriveTimeRepository;
    use chrono::TimeZone;

    fn eu_rules() -> DriveTimeRuleSet {
        DriveTimeRuleSet {
            standard_daily_drive_time: 9 * 3600,
            extended_drive_time: 10 * 3600,
            max_drive_time_weekly: 56 * 3600,
            max_drive_time_bi_weekly: 90 * 3600,
            count_extended_drive_time_weekly: 2,
            min_rest_between_drive_daily: 11 * 3600,
            count_short_rest_weekly: 3,
            consecutive_days_before_rest: 6,
        }
    }

    fn record(driver: i64, date: NaiveDate, drive: i64) -> DailyDriveRecord {
        DailyDriveRecord {
            driver_id: DriverId(driver),
            date,
            drive_seconds: drive,
            work_seconds: 0,
            available_seconds: 0,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn aggregates_partition_by_iso_week() {
        // 2024-06-12 is a Wednesday; the previous ISO week ran 06-03..06-09.
        let today = date(2024, 6, 12);
        let records = vec![
            record(1, today, 2 * 3600),
            record(1, date(2024, 6, 10), 3 * 3600),   // Monday, this week
            record(1, date(2024, 6, 9), 4 * 3600),    // Sunday, last week
            record(1, date(2024, 6, 3), 5 * 3600),    // Monday, last week
            record(1, date(2024, 6, 2), 8 * 3600),    // two weeks back, ignored
        ];
        let snapshot = aggregate_snapshot(&records, today, 9 * 3600, 11 * 3600);
        assert_eq!(snapshot.drive_today, 2 * 3600);
        assert_eq!(snapshot.this_week_drive, 5 * 3600);
        assert_eq!(snapshot.last_week_drive, 9 * 3600);
        assert_eq!(snapshot.bi_weekly_drive(), 14 * 3600);
        assert_eq!(snapshot.working_days_this_week, 2);
    }

    #[test]
    fn counts_extended_and_short_rest_days() {
        let today = date(2024, 6, 12);
        let long_day = DailyDriveRecord {
            driver_id: DriverId(1),
            date: date(2024, 6, 10),
            drive_seconds: 9 * 3600 + 1800, // over the 9h standard
            work_seconds: 0,
            available_seconds: 0,
        };
        let short_rest_day = DailyDriveRecord {
            driver_id: DriverId(1),
            date: date(2024, 6, 11),
            drive_seconds: 8 * 3600,
            work_seconds: 4 * 3600,
            available_seconds: 2 * 3600, // rest = 10h < 11h minimum
        };
        let snapshot =
            aggregate_snapshot(&[long_day, short_rest_day], today, 9 * 3600, 11 * 3600);
        assert_eq!(snapshot.used_extended_drive_days_this_week, 1);
        assert_eq!(snapshot.used_short_rest_days_this_week, 1);
    }

    #[test]
    fn daily_infringement_when_extended_allowance_exhausted() {
        // Extended days already used up, so the standard 9h limit applies;
        // 9h10m driven today is one infringement and zero remaining.
        let rules = eu_rules();
        let snapshot = DriveTimeSnapshot {
            drive_today: 33_000, // 9h10m
            used_extended_drive_days_this_week: 2,
            ..Default::default()
        };
        let result = evaluate(&snapshot, &rules);
        assert_eq!(result.max_drive_time_today, 32_400);
        assert_eq!(result.infringements, 1);
        assert_eq!(result.remaining_drive_today, 0);
    }

    #[test]
    fn extended_limit_applies_while_allowance_remains() {
        let rules = eu_rules();
        let snapshot = DriveTimeSnapshot {
            drive_today: 33_000, // 9h10m, under the 10h extended limit
            used_extended_drive_days_this_week: 0,
            ..Default::default()
        };
        let result = evaluate(&snapshot, &rules);
        assert_eq!(result.max_drive_time_today, 36_000);
        assert_eq!(result.infringements, 0);
        assert_eq!(result.remaining_drive_today, 3_000);
    }

    #[test]
    fn bi_weekly_overhang_reduces_weekly_cap() {
        // 50h last week leaves only 40h of the 90h bi-weekly budget, which
        // undercuts the nominal 56h weekly cap.
        let rules = eu_rules();
        let snapshot = DriveTimeSnapshot {
            last_week_drive: 50 * 3600,
            ..Default::default()
        };
        let result = evaluate(&snapshot, &rules);
        assert_eq!(result.this_week_max_drive_time, 40 * 3600);
        assert_eq!(result.remaining_drive_weekly, 40 * 3600);
    }

    #[test]
    fn negative_weekly_cap_flags_any_current_driving() {
        // Last week alone exceeded the bi-weekly budget. The weekly cap goes
        // negative, remaining clamps to zero, and one hour this week is an
        // infringement on top of the bi-weekly and last-week violations.
        let rules = eu_rules();
        let snapshot = DriveTimeSnapshot {
            this_week_drive: 3600,
            last_week_drive: 95 * 3600,
            ..Default::default()
        };
        let result = evaluate(&snapshot, &rules);
        assert!(result.this_week_max_drive_time < 0);
        assert_eq!(result.remaining_drive_weekly, 0);
        // bi-weekly > 90h, last week > 56h, this week > negative cap
        assert_eq!(result.infringements, 3);
    }

    #[test]
    fn remaining_allowances_never_negative() {
        let rules = eu_rules();
        let snapshot = DriveTimeSnapshot {
            drive_today: 20 * 3600,
            this_week_drive: 80 * 3600,
            last_week_drive: 80 * 3600,
            used_extended_drive_days_this_week: 5,
            ..Default::default()
        };
        let result = evaluate(&snapshot, &rules);
        assert!(result.remaining_drive_today >= 0);
        assert!(result.remaining_drive_weekly >= 0);
        assert!(result.remaining_drive_bi_weekly >= 0);
    }

    #[test]
    fn adding_drive_time_never_reduces_infringements() {
        let rules = eu_rules();
        let base = DriveTimeSnapshot {
            drive_today: 8 * 3600,
            this_week_drive: 30 * 3600,
            last_week_drive: 40 * 3600,
            ..Default::default()
        };
        let mut previous = evaluate(&base, &rules).infringements;
        for extra_hours in [2i64, 10, 20, 40] {
            let grown = DriveTimeSnapshot {
                drive_today: base.drive_today + extra_hours * 3600,
                this_week_drive: base.this_week_drive + extra_hours * 3600,
                ..base.clone()
            };
            let current = evaluate(&grown, &rules).infringements;
            assert!(current >= previous);
            previous = current;
        }
    }

    #[tokio::test]
    async fn missing_rule_set_is_an_error_not_a_default() {
        let mut repo = MockDriveTimeRepository::new();
        repo.expect_find_rule_set().returning(|_| Ok(None));
        let service = ComplianceService::new(Arc::new(repo));

        let at = Utc.with_ymd_and_hms(2024, 6, 12, 12, 0, 0).unwrap();
        let err = service
            .driver_compliance(DriverId(7), CustomerId(3), at)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ComplianceRulesMissing(_)));
    }

    #[tokio::test]
    async fn loads_trailing_window_and_evaluates() {
        let at = Utc.with_ymd_and_hms(2024, 6, 12, 12, 0, 0).unwrap();
        let today = at.date_naive();

        let mut repo = MockDriveTimeRepository::new();
        repo.expect_find_rule_set()
            .returning(|_| Ok(Some(eu_rules())));
        repo.expect_find_daily_records()
            .withf(move |driver, from, to| {
                *driver == DriverId(7)
                    && *to == today
                    && (*to - *from).num_days() == DRIVE_RECORD_WINDOW_DAYS
            })
            .returning(move |_, _, _| Ok(vec![record(7, today, 11 * 3600)]));

        let service = ComplianceService::new(Arc::new(repo));
        let report = service
            .driver_compliance(DriverId(7), CustomerId(3), at)
            .await
            .unwrap();
        // 11h today exceeds even the extended 10h limit.
        assert_eq!(report.result.infringements, 1);
        assert_eq!(report.snapshot.drive_today, 11 * 3600);
    }
}
