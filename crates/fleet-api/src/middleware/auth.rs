// ============================================================================
// Fleet API - Authentication Middleware
// File: crates/fleet-api/src/middleware/auth.rs
// ============================================================================
//! Bearer-token authentication. Builds the request's `Principal` from
//! verified JWT claims plus the optional `x-selected-customer` hint. The
//! hint is never trusted by itself; the tenant-context middleware
//! re-authorizes it on every request.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use tracing::warn;

use fleet_core::domain::Principal;
use fleet_shared::CustomerId;

use crate::error::ApiFailure;
use crate::response::ApiResponse;
use crate::state::AppState;

pub const SELECTED_CUSTOMER_HEADER: &str = "x-selected-customer";

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiFailure> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(unauthorized)?;

    let claims = state.jwt.validate_token(token).map_err(|e| {
        warn!("Token rejected: {}", e);
        unauthorized()
    })?;

    let mut principal = Principal::new(
        claims.user_id(),
        claims.username.as_str(),
        claims.customer_id(),
    );
    principal.is_dashboard_user = claims.dashboard;

    if let Some(raw) = req
        .headers()
        .get(SELECTED_CUSTOMER_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        match raw.parse::<CustomerId>() {
            Ok(selected) => principal.selected_customer_id = Some(selected),
            Err(_) => warn!("Ignoring unparsable {} header", SELECTED_CUSTOMER_HEADER),
        }
    }

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

fn unauthorized() -> ApiFailure {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::error("UNAUTHORIZED", "Authentication required")),
    )
}
