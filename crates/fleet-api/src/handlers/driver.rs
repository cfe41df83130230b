// ============================================================================
// Fleet API - Driver Compliance Handler
// File: crates/fleet-api/src/handlers/driver.rs
// ============================================================================
//! Driver drive-time compliance endpoint. Remaining allowances are emitted
//! both as "HH:MM:SS" strings and as raw seconds; the frontend uses the
//! strings for display and the seconds for progress bars.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::Utc;
use serde::Serialize;

use fleet_core::domain::EffectiveTenant;
use fleet_core::services::compliance::ComplianceReport;
use fleet_shared::time::seconds_to_clock;
use fleet_shared::DriverId;

use crate::error::{domain_error_to_response, ApiFailure};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsedTimeDto {
    pub today: String,
    pub weekly: String,
    pub bi_weekly: String,
    pub last_week: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverComplianceDto {
    pub driver_id: i64,

    pub infringements: u32,
    pub has_infringements: bool,

    // Remaining allowances, clock and raw-second form.
    pub remaining_drive_today: String,
    pub remaining_drive_weekly: String,
    pub remaining_drive_bi_weekly: String,
    pub remaining_drive_today_seconds: i64,
    pub remaining_drive_weekly_seconds: i64,
    pub remaining_drive_bi_weekly_seconds: i64,

    // Applicable limits for progress calculations.
    pub max_drive_today_seconds: i64,
    pub max_drive_weekly_seconds: i64,
    pub max_drive_bi_weekly_seconds: i64,

    // Allowance usage counters.
    pub extended_hours_used: i64,
    pub extended_hours_available: i64,
    pub short_rests_used: i64,
    pub short_rests_available: i64,
    pub working_days: i64,
    pub max_consecutive_days: i64,

    pub used_time: UsedTimeDto,
}

impl From<(DriverId, ComplianceReport)> for DriverComplianceDto {
    fn from((driver_id, report): (DriverId, ComplianceReport)) -> Self {
        let ComplianceReport {
            snapshot,
            result,
            rules,
        } = report;
        DriverComplianceDto {
            driver_id: driver_id.0,
            infringements: result.infringements,
            has_infringements: result.has_infringements(),
            remaining_drive_today: seconds_to_clock(result.remaining_drive_today),
            remaining_drive_weekly: seconds_to_clock(result.remaining_drive_weekly),
            remaining_drive_bi_weekly: seconds_to_clock(result.remaining_drive_bi_weekly),
            remaining_drive_today_seconds: result.remaining_drive_today,
            remaining_drive_weekly_seconds: result.remaining_drive_weekly,
            remaining_drive_bi_weekly_seconds: result.remaining_drive_bi_weekly,
            max_drive_today_seconds: result.max_drive_time_today,
            max_drive_weekly_seconds: result.this_week_max_drive_time,
            max_drive_bi_weekly_seconds: rules.max_drive_time_bi_weekly,
            extended_hours_used: snapshot.used_extended_drive_days_this_week,
            extended_hours_available: rules.count_extended_drive_time_weekly,
            short_rests_used: snapshot.used_short_rest_days_this_week,
            short_rests_available: rules.count_short_rest_weekly,
            working_days: snapshot.working_days_this_week,
            max_consecutive_days: rules.consecutive_days_before_rest,
            used_time: UsedTimeDto {
                today: seconds_to_clock(snapshot.drive_today),
                weekly: seconds_to_clock(snapshot.this_week_drive),
                bi_weekly: seconds_to_clock(snapshot.bi_weekly_drive()),
                last_week: seconds_to_clock(snapshot.last_week_drive),
            },
        }
    }
}

/// GET /api/driver/{id}
pub async fn driver_compliance(
    State(state): State<AppState>,
    Extension(tenant): Extension<EffectiveTenant>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DriverComplianceDto>>, ApiFailure> {
    let driver_id = DriverId(id);
    let report = state
        .compliance
        .driver_compliance(driver_id, tenant.customer_id, Utc::now())
        .await
        .map_err(|e| domain_error_to_response(&e, state.config.app.env.is_production()))?;

    Ok(Json(ApiResponse::success((driver_id, report).into())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::domain::{ComplianceResult, DriveTimeRuleSet, DriveTimeSnapshot};

    fn report() -> ComplianceReport {
        ComplianceReport {
            snapshot: DriveTimeSnapshot {
                drive_today: 2 * 3600,
                this_week_drive: 20 * 3600,
                last_week_drive: 30 * 3600,
                used_extended_drive_days_this_week: 1,
                used_short_rest_days_this_week: 0,
                working_days_this_week: 3,
            },
            result: ComplianceResult {
                infringements: 0,
                max_drive_time_today: 36_000,
                this_week_max_drive_time: 56 * 3600,
                remaining_drive_today: 36_000 - 2 * 3600,
                remaining_drive_weekly: 36 * 3600,
                remaining_drive_bi_weekly: 40 * 3600,
            },
            rules: DriveTimeRuleSet {
                standard_daily_drive_time: 9 * 3600,
                extended_drive_time: 10 * 3600,
                max_drive_time_weekly: 56 * 3600,
                max_drive_time_bi_weekly: 90 * 3600,
                count_extended_drive_time_weekly: 2,
                min_rest_between_drive_daily: 11 * 3600,
                count_short_rest_weekly: 3,
                consecutive_days_before_rest: 6,
            },
        }
    }

    #[test]
    fn dto_emits_both_representations() {
        let dto = DriverComplianceDto::from((DriverId(7), report()));
        assert_eq!(dto.remaining_drive_today, "08:00:00");
        assert_eq!(dto.remaining_drive_today_seconds, 8 * 3600);
        assert_eq!(dto.remaining_drive_weekly, "36:00:00");
        assert_eq!(dto.remaining_drive_weekly_seconds, 36 * 3600);
        assert!(!dto.has_infringements);
    }

    #[test]
    fn dto_serializes_camel_case_fields() {
        let dto = DriverComplianceDto::from((DriverId(7), report()));
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("remainingDriveToday").is_some());
        assert!(json.get("remainingDriveTodaySeconds").is_some());
        assert!(json.get("infringements").is_some());
        assert_eq!(json["usedTime"]["lastWeek"], "30:00:00");
    }
}
