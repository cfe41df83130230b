// ============================================================================
// Fleet Infrastructure - PostgreSQL Drive Time Repository
// File: crates/fleet-infrastructure/src/database/postgres/drive_time_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use tracing::error;

use fleet_core::domain::{DailyDriveRecord, DriveTimeRuleSet};
use fleet_core::error::DomainError;
use fleet_core::repositories::DriveTimeRepository;
use fleet_shared::{CustomerId, DriverId};

pub struct PgDriveTimeRepository {
    pool: PgPool,
}

impl PgDriveTimeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row types for SQLx mapping
#[derive(Debug, FromRow)]
struct RuleSetRow {
    standard_daily_drive_time: i64,
    extended_drive_time: i64,
    max_drive_time_weekly: i64,
    max_drive_time_bi_weekly: i64,
    count_extended_drive_time_weekly: i64,
    min_rest_between_drive_daily: i64,
    count_short_rest_weekly: i64,
    consecutive_days_before_rest: i64,
}

impl From<RuleSetRow> for DriveTimeRuleSet {
    fn from(row: RuleSetRow) -> Self {
        DriveTimeRuleSet {
            standard_daily_drive_time: row.standard_daily_drive_time,
            extended_drive_time: row.extended_drive_time,
            max_drive_time_weekly: row.max_drive_time_weekly,
            max_drive_time_bi_weekly: row.max_drive_time_bi_weekly,
            count_extended_drive_time_weekly: row.count_extended_drive_time_weekly,
            min_rest_between_drive_daily: row.min_rest_between_drive_daily,
            count_short_rest_weekly: row.count_short_rest_weekly,
            consecutive_days_before_rest: row.consecutive_days_before_rest,
        }
    }
}

#[derive(Debug, FromRow)]
struct DriveRecordRow {
    driver_id: i64,
    drive_date: NaiveDate,
    drive: i64,
    work: i64,
    available: i64,
}

impl From<DriveRecordRow> for DailyDriveRecord {
    fn from(row: DriveRecordRow) -> Self {
        DailyDriveRecord {
            driver_id: DriverId(row.driver_id),
            date: row.drive_date,
            drive_seconds: row.drive,
            work_seconds: row.work,
            available_seconds: row.available,
        }
    }
}

#[async_trait]
impl DriveTimeRepository for PgDriveTimeRepository {
    async fn find_rule_set(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<DriveTimeRuleSet>, DomainError> {
        // The legacy settings table keys drive-time rules through the
        // tenant's settings row; its customer_id column is text.
        let row: Option<RuleSetRow> = sqlx::query_as(
            r#"
            SELECT
                standard_daily_drive_time, extended_drive_time,
                max_drive_time_weekly, max_drive_time_bi_weekly,
                count_extended_drive_time_weekly, min_rest_between_drive_daily,
                count_short_rest_weekly, consecutive_days_before_rest
            FROM settings_drivetime
            WHERE settings_id = (
                SELECT id FROM settings WHERE customer_id = $1 LIMIT 1
            )
            "#,
        )
        .bind(customer_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding drive time rules: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_daily_records(
        &self,
        driver_id: DriverId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyDriveRecord>, DomainError> {
        let rows: Vec<DriveRecordRow> = sqlx::query_as(
            r#"
            SELECT driver_id, drive_date, drive, work, available
            FROM drivetimes
            WHERE driver_id = $1 AND drive_date BETWEEN $2 AND $3
            ORDER BY drive_date
            "#,
        )
        .bind(driver_id.0)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error loading drive records: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
