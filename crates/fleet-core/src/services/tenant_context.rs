// ============================================================================
// Fleet Core - Tenant Context
// File: crates/fleet-core/src/services/tenant_context.rs
// ============================================================================
//! Per-request orchestration: origin -> hostname -> tenant -> authorization
//! -> effective customer. Runs on every tenant-scoped request; a session's
//! selected customer is only a hint and is re-authorized here each time, so
//! a grant that expires mid-session stops working immediately.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::{AccessReason, EffectiveTenant, Principal};
use crate::error::DomainError;
use crate::repositories::{AccessRepository, TenantRepository};
use crate::services::access::{extract_domain, AccessService};

pub struct TenantContext<A: AccessRepository, T: TenantRepository> {
    access: Arc<AccessService<A, T>>,
}

impl<A: AccessRepository, T: TenantRepository> TenantContext<A, T> {
    pub fn new(access: Arc<AccessService<A, T>>) -> Self {
        Self { access }
    }

    /// Authorize one request. `origin` is the raw Origin/Referer header
    /// value, if any. Steps are strictly sequential: each depends on the
    /// previous result.
    pub async fn authorize(
        &self,
        principal: &Principal,
        origin: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<EffectiveTenant, DomainError> {
        let hostname = extract_domain(origin);
        let tenant = self.access.resolve_tenant(&hostname).await?;

        // An explicit selection overrides the domain's tenant, but only
        // after it passes the same authorization as any other target.
        let target = match (&tenant, principal.selected_customer_id) {
            (_, Some(selected)) => selected,
            (Some(config), None) => config.customer_id,
            (None, None) => principal
                .primary_customer_id
                .ok_or(DomainError::AccessDenied(AccessReason::Denied))?,
        };

        let decision = self.access.can_access_tenant(principal, target, at).await?;
        if !decision.granted {
            warn!(
                "Tenant access denied: user={} domain={} target={} reason={}",
                principal.user_id,
                hostname,
                target,
                decision.reason.as_str()
            );
            return Err(DomainError::AccessDenied(decision.reason));
        }

        let reason = if tenant.is_none() {
            AccessReason::DevelopmentMode
        } else {
            decision.reason
        };

        info!(
            "Tenant access granted: user={} domain={} effective={} reason={}",
            principal.user_id,
            hostname,
            target,
            reason.as_str()
        );

        Ok(EffectiveTenant {
            customer_id: target,
            tenant,
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TenantConfig;
    use crate::repositories::{MockAccessRepository, MockTenantRepository};
    use chrono::TimeZone;
    use fleet_shared::config::AppEnv;
    use fleet_shared::{CustomerId, UserId};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 12, 12, 0, 0).unwrap()
    }

    fn tenant_config(customer: i64) -> TenantConfig {
        TenantConfig {
            id: 1,
            domain: "demo.fleetconnect.nl".into(),
            customer_id: CustomerId(customer),
            site_name: Some("Demo".into()),
            language: Some("nl".into()),
        }
    }

    fn context(
        access: MockAccessRepository,
        tenant: MockTenantRepository,
        env: AppEnv,
    ) -> TenantContext<MockAccessRepository, MockTenantRepository> {
        TenantContext::new(Arc::new(AccessService::new(
            Arc::new(access),
            Arc::new(tenant),
            env,
        )))
    }

    #[tokio::test]
    async fn binds_domain_customer_for_matching_principal() {
        let mut tenant = MockTenantRepository::new();
        tenant
            .expect_find_by_domain()
            .withf(|d| d == "demo.fleetconnect.nl")
            .returning(|_| Ok(Some(tenant_config(5))));
        let ctx = context(MockAccessRepository::new(), tenant, AppEnv::Production);

        let principal = Principal::new(UserId(1), "u", Some(CustomerId(5)));
        let effective = ctx
            .authorize(&principal, Some("https://demo.fleetconnect.nl"), at())
            .await
            .unwrap();
        assert_eq!(effective.customer_id, CustomerId(5));
        assert_eq!(effective.reason, AccessReason::DirectMatch);
    }

    #[tokio::test]
    async fn selected_customer_is_reauthorized_every_request() {
        // The session still claims customer 20, but the grant 5 -> 20 has
        // been revoked: the request must fail regardless of the session.
        let mut tenant = MockTenantRepository::new();
        tenant
            .expect_find_by_domain()
            .returning(|_| Ok(Some(tenant_config(5))));
        let mut access = MockAccessRepository::new();
        access
            .expect_count_effective_grants()
            .returning(|_, _, _| Ok(0));
        access.expect_count_grant_edges().returning(|_, _| Ok(1));
        let ctx = context(access, tenant, AppEnv::Production);

        let mut principal = Principal::new(UserId(1), "u", Some(CustomerId(5)));
        principal.selected_customer_id = Some(CustomerId(20));

        let err = ctx
            .authorize(&principal, Some("https://demo.fleetconnect.nl"), at())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::AccessDenied(AccessReason::GrantExpired)
        ));
    }

    #[tokio::test]
    async fn selected_customer_with_live_grant_is_bound() {
        let mut tenant = MockTenantRepository::new();
        tenant
            .expect_find_by_domain()
            .returning(|_| Ok(Some(tenant_config(5))));
        let mut access = MockAccessRepository::new();
        access
            .expect_count_effective_grants()
            .returning(|from, to, _| {
                Ok(if from == CustomerId(5) && to == CustomerId(20) {
                    1
                } else {
                    0
                })
            });
        let ctx = context(access, tenant, AppEnv::Production);

        let mut principal = Principal::new(UserId(1), "u", Some(CustomerId(5)));
        principal.selected_customer_id = Some(CustomerId(20));

        let effective = ctx
            .authorize(&principal, Some("https://demo.fleetconnect.nl"), at())
            .await
            .unwrap();
        assert_eq!(effective.customer_id, CustomerId(20));
        assert_eq!(effective.reason, AccessReason::GrantedAccess);
    }

    #[tokio::test]
    async fn unconfigured_domain_in_development_binds_own_customer() {
        let mut tenant = MockTenantRepository::new();
        tenant.expect_find_by_domain().returning(|_| Ok(None));
        let ctx = context(MockAccessRepository::new(), tenant, AppEnv::Development);

        let principal = Principal::new(UserId(1), "u", Some(CustomerId(7)));
        let effective = ctx.authorize(&principal, None, at()).await.unwrap();
        assert_eq!(effective.customer_id, CustomerId(7));
        assert_eq!(effective.reason, AccessReason::DevelopmentMode);
        assert!(effective.tenant.is_none());
    }

    #[tokio::test]
    async fn foreign_principal_without_grant_is_denied() {
        let mut tenant = MockTenantRepository::new();
        tenant
            .expect_find_by_domain()
            .returning(|_| Ok(Some(tenant_config(5))));
        let mut access = MockAccessRepository::new();
        access
            .expect_count_effective_grants()
            .returning(|_, _, _| Ok(0));
        access.expect_count_grant_edges().returning(|_, _| Ok(0));
        let ctx = context(access, tenant, AppEnv::Production);

        let principal = Principal::new(UserId(1), "u", Some(CustomerId(99)));
        let err = ctx
            .authorize(&principal, Some("https://demo.fleetconnect.nl"), at())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::AccessDenied(AccessReason::Denied)
        ));
    }
}
