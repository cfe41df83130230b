// ============================================================================
// Fleet Core - Access Resolution Service
// File: crates/fleet-core/src/services/access.rs
// ============================================================================
//! Multi-tenant access resolution: request origin -> tenant, plus the
//! super-admin / direct-match / grant-graph authorization rules.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use fleet_shared::config::AppEnv;
use fleet_shared::constants::{DEFAULT_DOMAIN, SUPER_ADMIN_PERMISSION_LEVEL};
use fleet_shared::CustomerId;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::{AccessDecision, AccessReason, Customer, Principal, TenantConfig};
use crate::error::DomainError;
use crate::repositories::{AccessRepository, TenantRepository};

/// Extract the hostname from an Origin or Referer header value. Absent or
/// unparsable values fall back to "localhost" so local tooling keeps
/// working; production requests always carry a browser-set Origin.
pub fn extract_domain(origin: Option<&str>) -> String {
    match origin {
        Some(raw) => match Url::parse(raw) {
            Ok(url) => url
                .host_str()
                .map(str::to_string)
                .unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            Err(_) => DEFAULT_DOMAIN.to_string(),
        },
        None => DEFAULT_DOMAIN.to_string(),
    }
}

/// Decides which tenants a principal may act as. Pure decision function:
/// reads the permission store and grant graph, never writes.
pub struct AccessService<A: AccessRepository, T: TenantRepository> {
    access_repo: Arc<A>,
    tenant_repo: Arc<T>,
    environment: AppEnv,
}

impl<A: AccessRepository, T: TenantRepository> AccessService<A, T> {
    pub fn new(access_repo: Arc<A>, tenant_repo: Arc<T>, environment: AppEnv) -> Self {
        Self {
            access_repo,
            tenant_repo,
            environment,
        }
    }

    /// Super admin: no home tenant AND at least one permission assignment
    /// below level 10.
    pub async fn is_super_admin(&self, principal: &Principal) -> Result<bool, DomainError> {
        if principal.primary_customer_id.is_some() {
            return Ok(false);
        }
        let count = self
            .access_repo
            .count_permissions_below(principal.user_id, SUPER_ADMIN_PERMISSION_LEVEL)
            .await?;
        Ok(count > 0)
    }

    /// Domain settings for a hostname. Unconfigured hostnames fail open
    /// outside production (local tooling, fresh environments) and fail
    /// closed in production.
    pub async fn resolve_tenant(
        &self,
        hostname: &str,
    ) -> Result<Option<TenantConfig>, DomainError> {
        match self.tenant_repo.find_by_domain(hostname).await? {
            Some(tenant) => Ok(Some(tenant)),
            None => {
                if self.environment.is_production() {
                    warn!("Rejecting unconfigured domain: {}", hostname);
                    Err(DomainError::DomainNotConfigured(hostname.to_string()))
                } else {
                    debug!("No settings for domain {}, allowing (non-production)", hostname);
                    Ok(None)
                }
            }
        }
    }

    /// May `principal` see `target`'s data at `at`? Grant order: super
    /// admin, direct customer match, then an effective grant edge from the
    /// principal's primary (or explicitly selected) customer.
    pub async fn can_access_tenant(
        &self,
        principal: &Principal,
        target: CustomerId,
        at: DateTime<Utc>,
    ) -> Result<AccessDecision, DomainError> {
        if self.is_super_admin(principal).await? {
            return Ok(AccessDecision::granted(AccessReason::SuperAdmin));
        }

        if principal.primary_customer_id == Some(target) {
            return Ok(AccessDecision::granted(AccessReason::DirectMatch));
        }

        let mut sources = Vec::new();
        if let Some(primary) = principal.primary_customer_id {
            sources.push(primary);
        }
        if let Some(selected) = principal.selected_customer_id {
            if Some(selected) != principal.primary_customer_id {
                sources.push(selected);
            }
        }

        for source in &sources {
            if self
                .access_repo
                .count_effective_grants(*source, target, at)
                .await?
                > 0
            {
                return Ok(AccessDecision::granted(AccessReason::GrantedAccess));
            }
        }

        // Distinguish an expired/deactivated edge from no edge at all; the
        // caller sees the same denial, the audit log does not.
        for source in &sources {
            if self.access_repo.count_grant_edges(*source, target).await? > 0 {
                info!(
                    "Access denied for user {}: grant {} -> {} no longer valid",
                    principal.user_id, source, target
                );
                return Ok(AccessDecision::denied(AccessReason::GrantExpired));
            }
        }

        Ok(AccessDecision::denied(AccessReason::Denied))
    }

    /// The customers a tenant-switcher may offer: the customer itself plus
    /// every target of a currently-effective outbound grant.
    pub async fn list_accessible_customers(
        &self,
        customer_id: CustomerId,
        at: DateTime<Utc>,
    ) -> Result<Vec<Customer>, DomainError> {
        let mut customers = self
            .access_repo
            .list_effective_grants(customer_id, at)
            .await?;

        if !customers.iter().any(|c| c.id == customer_id) {
            if let Some(own) = self.tenant_repo.find_customer(customer_id).await? {
                customers.insert(0, own);
            }
        } else {
            // Self-grant rows come back in arbitrary order; the switcher
            // shows the owning customer first.
            customers.sort_by_key(|c| c.id != customer_id);
        }

        Ok(customers)
    }

    /// Validate an explicit switch request. Switching is checked against the
    /// domain's customer, not the user's: the grant graph of the tenant the
    /// frontend belongs to decides what may be selected.
    pub async fn can_switch_to(
        &self,
        domain_customer: CustomerId,
        target: CustomerId,
        at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        if domain_customer == target {
            return Ok(true);
        }
        let count = self
            .access_repo
            .count_effective_grants(domain_customer, target, at)
            .await?;
        Ok(count > 0)
    }
}
