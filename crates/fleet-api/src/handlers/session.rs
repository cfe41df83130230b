// ============================================================================
// Fleet API - Session Handlers
// File: crates/fleet-api/src/handlers/session.rs
// ============================================================================
//! Session info and explicit customer switching. A switch is validated
//! against the grant graph of the domain's customer; the returned selection
//! is only a hint that later requests re-authorize.

use axum::extract::State;
use axum::http::header::{ORIGIN, REFERER};
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use fleet_core::domain::{EffectiveTenant, Principal};
use fleet_core::services::extract_domain;
use fleet_shared::CustomerId;

use crate::error::{domain_error_to_response, ApiFailure};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfoDto {
    pub user_id: i64,
    pub username: String,
    pub customer_id: Option<i64>,
    pub selected_customer_id: Option<i64>,
    pub effective_customer_id: i64,
}

/// GET /api/session/info
pub async fn session_info(
    Extension(principal): Extension<Principal>,
    Extension(tenant): Extension<EffectiveTenant>,
) -> Json<ApiResponse<SessionInfoDto>> {
    Json(ApiResponse::success(SessionInfoDto {
        user_id: principal.user_id.0,
        username: principal.username.clone(),
        customer_id: principal.primary_customer_id.map(|c| c.as_i64()),
        selected_customer_id: principal.selected_customer_id.map(|c| c.as_i64()),
        effective_customer_id: tenant.customer_id.as_i64(),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStatusDto {
    pub active: bool,
    pub seconds_until_timeout: Option<i64>,
}

/// GET /api/session/activity-status
///
/// Polling endpoint for the frontend's idle warning. Exempt from activity
/// tracking itself, so polling never keeps a session alive.
pub async fn activity_status(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Json<ApiResponse<ActivityStatusDto>> {
    let seconds = state
        .activity
        .time_until_timeout(principal.user_id, Utc::now());
    Json(ApiResponse::success(ActivityStatusDto {
        active: seconds.map(|s| s > 0).unwrap_or(true),
        seconds_until_timeout: seconds,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchCustomerRequest {
    pub customer_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchCustomerResponse {
    pub selected_customer_id: i64,
}

/// PUT /api/session/customer
pub async fn switch_customer(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
    Json(payload): Json<SwitchCustomerRequest>,
) -> Result<Json<ApiResponse<SwitchCustomerResponse>>, ApiFailure> {
    let production = state.config.app.env.is_production();
    let target = CustomerId(payload.customer_id);

    // The switch is scoped to the domain the frontend came through.
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

    let allowed = state
        .access
        .can_switch_to(tenant.customer_id, target, Utc::now())
        .await
        .map_err(|e| domain_error_to_response(&e, production))?;

    if !allowed {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error(
                "ACCESS_DENIED",
                "You do not have access to this customer",
            )),
        ));
    }

    info!(
        "User {} switched to customer {} via domain {}",
        principal.user_id, target, hostname
    );

    Ok(Json(ApiResponse::success(SwitchCustomerResponse {
        selected_customer_id: target.as_i64(),
    })))
}
