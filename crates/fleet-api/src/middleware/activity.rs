// ============================================================================
// Fleet API - Activity Tracking Middleware
// File: crates/fleet-api/src/middleware/activity.rs
// ============================================================================
//! Per-user inactivity timeout. Background refresh traffic and the
//! activity-status poll itself do not count as activity.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use chrono::Utc;

use fleet_core::domain::Principal;
use fleet_security::ActivityStatus;

use crate::error::ApiFailure;
use crate::response::ApiResponse;
use crate::state::AppState;

pub const BACKGROUND_REFRESH_HEADER: &str = "x-background-refresh";
pub const ACTIVITY_STATUS_PATH: &str = "/api/session/activity-status";

pub async fn track_activity(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiFailure> {
    let background = req
        .headers()
        .get(BACKGROUND_REFRESH_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "true")
        .unwrap_or(false);

    if background || req.uri().path() == ACTIVITY_STATUS_PATH {
        return Ok(next.run(req).await);
    }

    if let Some(principal) = req.extensions().get::<Principal>().cloned() {
        let now = Utc::now();
        if state.activity.check(principal.user_id, now) == ActivityStatus::TimedOut {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error(
                    "INACTIVITY_TIMEOUT",
                    "Session expired due to inactivity",
                )),
            ));
        }
        state
            .activity
            .touch(principal.user_id, principal.is_dashboard_user, now);
    }

    Ok(next.run(req).await)
}
