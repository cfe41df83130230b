//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Deployment environment. Drives the unconfigured-domain policy: development
/// fails open, production fails closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn is_production(&self) -> bool {
        matches!(self, AppEnv::Production)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub session: SessionSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: AppEnv,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub cors_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub access_token_expiry_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub inactivity_timeout_minutes: i64,
    pub dashboard_inactivity_timeout_minutes: i64,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "fleet-server")?
            .set_default("app.cors_origin", "http://localhost:5173")?
            .set_default("database.max_connections", 10)?
            .set_default("auth.access_token_expiry_seconds", 3600)?
            .set_default(
                "session.inactivity_timeout_minutes",
                crate::constants::DEFAULT_INACTIVITY_TIMEOUT_MINUTES,
            )?
            .set_default(
                "session.dashboard_inactivity_timeout_minutes",
                crate::constants::DASHBOARD_INACTIVITY_TIMEOUT_MINUTES,
            )?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }
}
