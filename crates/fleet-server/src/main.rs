use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, put};
use axum::Router;
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use fleet_api::handlers::{customers, driver, health, session};
use fleet_api::middleware::{require_auth, tenant_context, track_activity};
use fleet_api::state::AppState;
use fleet_core::services::{AccessService, ComplianceService, TenantContext};
use fleet_infrastructure::database::connection;
use fleet_infrastructure::{PgAccessRepository, PgDriveTimeRepository, PgTenantRepository};
use fleet_security::{ActivityTracker, JwtService};
use fleet_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    fleet_shared::telemetry::init_telemetry();

    info!("Fleet server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    info!("Connecting to database...");
    let pool =
        connection::create_pool(&config.database.url, config.database.max_connections).await?;
    info!("Database connection established.");

    // Repositories
    let drive_time_repo = Arc::new(PgDriveTimeRepository::new(pool.clone()));
    let tenant_repo = Arc::new(PgTenantRepository::new(pool.clone()));
    let access_repo = Arc::new(PgAccessRepository::new(pool.clone()));

    // Services
    let compliance = Arc::new(ComplianceService::new(drive_time_repo));
    let access = Arc::new(AccessService::new(access_repo, tenant_repo, config.app.env));
    let tenant_ctx = Arc::new(TenantContext::new(access.clone()));
    let jwt = Arc::new(JwtService::new(
        config.auth.jwt_secret.clone(),
        config.auth.access_token_expiry_seconds,
    ));
    let activity = Arc::new(ActivityTracker::new(
        config.session.inactivity_timeout_minutes,
        config.session.dashboard_inactivity_timeout_minutes,
    ));

    // Periodic eviction keeps the activity map from growing with
    // logged-out users.
    let eviction_tracker = activity.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(600));
        loop {
            interval.tick().await;
            eviction_tracker.evict_expired(Utc::now());
        }
    });

    let state = AppState {
        compliance,
        access,
        tenant_context: tenant_ctx,
        jwt,
        activity,
        config: config.clone(),
    };

    // Tenant-scoped routes: auth -> activity -> tenant context, outermost
    // layer first.
    let tenant_routes = Router::new()
        .route("/api/driver/{id}", get(driver::driver_compliance))
        .route("/api/session/info", get(session::session_info))
        .layer(from_fn_with_state(state.clone(), tenant_context));

    // Authenticated routes that resolve their own domain scope.
    let session_routes = Router::new()
        .route("/api/session/customer", put(session::switch_customer))
        .route(
            "/api/session/activity-status",
            get(session::activity_status),
        )
        .route(
            "/api/settings/customer-context",
            get(customers::customer_context),
        );

    let app = Router::new()
        .merge(tenant_routes)
        .merge(session_routes)
        .layer(from_fn_with_state(state.clone(), track_activity))
        .layer(from_fn_with_state(state.clone(), require_auth))
        .route("/health", get(health::health_check))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(config.app.cors_origin.parse::<HeaderValue>()?)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::AUTHORIZATION,
                    axum::http::HeaderName::from_static("x-selected-customer"),
                    axum::http::HeaderName::from_static("x-background-refresh"),
                ]),
        )
        .layer(TraceLayer::new_for_http());

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
