// ============================================================================
// Fleet Infrastructure - PostgreSQL Tenant Repository
// File: crates/fleet-infrastructure/src/database/postgres/tenant_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;

use fleet_core::domain::{Customer, TenantConfig};
use fleet_core::error::DomainError;
use fleet_core::repositories::TenantRepository;
use fleet_shared::CustomerId;

pub struct PgTenantRepository {
    pool: PgPool,
}

impl PgTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping. customer_id is text in the legacy
// schema; it is parsed into the canonical id exactly once, here.
#[derive(Debug, FromRow)]
struct SettingsRow {
    id: i64,
    domain: String,
    customer_id: String,
    site_name: Option<String>,
    language: Option<String>,
}

impl TryFrom<SettingsRow> for TenantConfig {
    type Error = DomainError;

    fn try_from(row: SettingsRow) -> Result<Self, Self::Error> {
        let customer_id = row
            .customer_id
            .parse::<CustomerId>()
            .map_err(|_| DomainError::InvalidStoredId(row.customer_id.clone()))?;
        Ok(TenantConfig {
            id: row.id,
            domain: row.domain,
            customer_id,
            site_name: row.site_name,
            language: row.language,
        })
    }
}

#[derive(Debug, FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: CustomerId(row.id),
            name: row.name,
        }
    }
}

#[async_trait]
impl TenantRepository for PgTenantRepository {
    async fn find_by_domain(&self, domain: &str) -> Result<Option<TenantConfig>, DomainError> {
        let row: Option<SettingsRow> = sqlx::query_as(
            r#"
            SELECT id, domain, customer_id, site_name, language
            FROM settings
            WHERE domain = $1
            "#,
        )
        .bind(domain)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding settings by domain: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        row.map(TenantConfig::try_from).transpose()
    }

    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, name
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding customer: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }
}
