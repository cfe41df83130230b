//! Domain error -> HTTP status translation
//!
//! Authorization failures stay opaque in production: the precise reason
//! goes to the logs, the caller gets a generic message. Outside production
//! the reason is echoed for debuggability.

use axum::http::StatusCode;
use axum::Json;

use fleet_core::error::DomainError;

use crate::response::ApiResponse;

pub type ApiFailure = (StatusCode, Json<ApiResponse<()>>);

pub fn domain_error_to_response(err: &DomainError, production: bool) -> ApiFailure {
    match err {
        DomainError::AccessDenied(reason) => {
            let message = if production {
                "You do not have access to this customer"
            } else {
                reason.as_str()
            };
            (
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("ACCESS_DENIED", message)),
            )
        }
        DomainError::DomainNotConfigured(domain) => {
            // Never reveal which domains exist in production.
            let message = if production {
                "Not found".to_string()
            } else {
                format!("Domain settings not found: {}", domain)
            };
            (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("DOMAIN_NOT_CONFIGURED", &message)),
            )
        }
        DomainError::ComplianceRulesMissing(_) => (
            // Tenant misconfiguration, not a user error.
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("SERVER_ERROR", "Internal server error")),
        ),
        DomainError::DriverNotFound => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("NOT_FOUND", "Driver not found")),
        ),
        DomainError::CustomerNotFound => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("NOT_FOUND", "Customer not found")),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("SERVER_ERROR", "Internal server error")),
        ),
    }
}
