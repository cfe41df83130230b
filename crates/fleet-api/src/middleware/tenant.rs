// ============================================================================
// Fleet API - Tenant Context Middleware
// File: crates/fleet-api/src/middleware/tenant.rs
// ============================================================================
//! Resolves and authorizes the effective customer for every tenant-scoped
//! request: Origin/Referer -> hostname -> tenant config -> authorization.
//! Runs fresh on each request; nothing from the session is trusted without
//! re-validation.

use axum::extract::{Request, State};
use axum::http::header::{ORIGIN, REFERER};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use chrono::Utc;

use fleet_core::domain::Principal;

use crate::error::{domain_error_to_response, ApiFailure};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn tenant_context(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiFailure> {
    // Installed behind require_auth; a missing principal is a wiring bug.
    let principal = req.extensions().get::<Principal>().cloned().ok_or((
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::error("UNAUTHORIZED", "Authentication required")),
    ))?;

    let origin = req
        .headers()
        .get(ORIGIN)
        .or_else(|| req.headers().get(REFERER))
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let effective = state
        .tenant_context
        .authorize(&principal, origin.as_deref(), Utc::now())
        .await
        .map_err(|e| domain_error_to_response(&e, state.config.app.env.is_production()))?;

    req.extensions_mut().insert(effective);
    Ok(next.run(req).await)
}
