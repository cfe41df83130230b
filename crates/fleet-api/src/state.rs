use std::sync::Arc;

use fleet_core::services::{AccessService, ComplianceService, TenantContext};
use fleet_infrastructure::{PgAccessRepository, PgDriveTimeRepository, PgTenantRepository};
use fleet_security::{ActivityTracker, JwtService};
use fleet_shared::config::AppConfig;

pub type Compliance = ComplianceService<PgDriveTimeRepository>;
pub type Access = AccessService<PgAccessRepository, PgTenantRepository>;
pub type Context = TenantContext<PgAccessRepository, PgTenantRepository>;

#[derive(Clone)]
pub struct AppState {
    pub compliance: Arc<Compliance>,
    pub access: Arc<Access>,
    pub tenant_context: Arc<Context>,
    pub jwt: Arc<JwtService>,
    pub activity: Arc<ActivityTracker>,
    pub config: AppConfig,
}
