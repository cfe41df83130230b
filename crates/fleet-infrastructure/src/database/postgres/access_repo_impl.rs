// ============================================================================
// Fleet Infrastructure - PostgreSQL Access Repository
// File: crates/fleet-infrastructure/src/database/postgres/access_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;

use fleet_core::domain::Customer;
use fleet_core::error::DomainError;
use fleet_core::repositories::AccessRepository;
use fleet_shared::{CustomerId, UserId};

pub struct PgAccessRepository {
    pool: PgPool,
}

impl PgAccessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
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
impl AccessRepository for PgAccessRepository {
    async fn count_permissions_below(
        &self,
        user_id: UserId,
        level: i32,
    ) -> Result<i64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM user_permission_matches
            WHERE user_id = $1 AND permission_id < $2
            "#,
        )
        .bind(user_id.0)
        .bind(level)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error counting permissions: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(count)
    }

    async fn count_effective_grants(
        &self,
        from: CustomerId,
        to: CustomerId,
        at: DateTime<Utc>,
    ) -> Result<i64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM customer_customer
            WHERE cust_id = $1
              AND related_customer_id = $2
              AND active
              AND $3 BETWEEN valid_from AND valid_until
            "#,
        )
        .bind(from.as_i64())
        .bind(to.as_i64())
        .bind(at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error counting grants: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(count)
    }

    async fn count_grant_edges(
        &self,
        from: CustomerId,
        to: CustomerId,
    ) -> Result<i64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM customer_customer
            WHERE cust_id = $1 AND related_customer_id = $2
            "#,
        )
        .bind(from.as_i64())
        .bind(to.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error counting grant edges: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(count)
    }

    async fn list_effective_grants(
        &self,
        from: CustomerId,
        at: DateTime<Utc>,
    ) -> Result<Vec<Customer>, DomainError> {
        // Owning customer sorts first when a self-grant row exists, the
        // rest alphabetically, matching the tenant-switcher ordering.
        let rows: Vec<CustomerRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.name
            FROM customer_customer cc
            JOIN customers c ON c.id = cc.related_customer_id
            WHERE cc.cust_id = $1
              AND cc.active
              AND $2 BETWEEN cc.valid_from AND cc.valid_until
            ORDER BY (c.id = cc.cust_id) DESC, c.name ASC
            "#,
        )
        .bind(from.as_i64())
        .bind(at)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing accessible customers: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
