// ============================================================================
// Fleet API - Customer Context Handler
// File: crates/fleet-api/src/handlers/customers.rs
// ============================================================================
//! Tenant-switcher data: the customers reachable from the domain's customer
//! through currently-effective grants, with the domain's own customer
//! starred and listed first.

use axum::extract::State;
use axum::http::header::{ORIGIN, REFERER};
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use chrono::Utc;
use serde::Serialize;

use fleet_core::domain::Principal;
use fleet_core::services::extract_domain;

use crate::error::{domain_error_to_response, ApiFailure};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOptionDto {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContextDto {
    pub groups: Vec<CustomerOptionDto>,
    pub selected_customer_id: i64,
    pub domain_customer_id: i64,
}

/// GET /api/settings/customer-context
pub async fn customer_context(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<CustomerContextDto>>, ApiFailure> {
    let production = state.config.app.env.is_production();

    let origin = headers
        .get(ORIGIN)
        .or_else(|| headers.get(REFERER))
        .and_then(|v| v.to_str().ok());
    let hostname = extract_domain(origin);

    let tenant = state
        .access
        .resolve_tenant(&hostname)
        .await
        .map_err(|e| domain_error_to_response(&e, production))?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "DOMAIN_NOT_CONFIGURED",
                    "Domain settings not found",
                )),
            )
        })?;

    let customers = state
        .access
        .list_accessible_customers(tenant.customer_id, Utc::now())
        .await
        .map_err(|e| domain_error_to_response(&e, production))?;

    let groups = customers
        .into_iter()
        .map(|c| CustomerOptionDto {
            id: c.id.as_i64(),
            name: if c.id == tenant.customer_id {
                format!("* {}", c.name)
            } else {
                c.name
            },
        })
        .collect();

    let selected = principal
        .selected_customer_id
        .unwrap_or(tenant.customer_id);

    Ok(Json(ApiResponse::success(CustomerContextDto {
        groups,
        selected_customer_id: selected.as_i64(),
        domain_customer_id: tenant.customer_id.as_i64(),
    })))
}
