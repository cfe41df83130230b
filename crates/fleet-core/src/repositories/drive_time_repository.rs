//! Drive time repository trait (port)

use async_trait::async_trait;
use chrono::NaiveDate;
use fleet_shared::{CustomerId, DriverId};

use crate::domain::{DailyDriveRecord, DriveTimeRuleSet};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriveTimeRepository: Send + Sync {
    /// The tenant's active rule set, if one is configured.
    async fn find_rule_set(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<DriveTimeRuleSet>, DomainError>;

    /// Daily drive records for one driver, `from..=to` inclusive.
    async fn find_daily_records(
        &self,
        driver_id: DriverId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyDriveRecord>, DomainError>;
}
