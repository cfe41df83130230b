//! JWT token handling

use chrono::{Duration, Utc};
use fleet_shared::{CustomerId, UserId};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
}

/// Bearer-token claims carrying the principal. `customer_id` is absent for
/// super admins (no home tenant).
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub user_id: i64,
    pub customer_id: Option<i64>,
    pub username: String,
    /// Marks wallboard/dashboard sessions, which get the long inactivity
    /// timeout. Absent in older tokens.
    #[serde(default)]
    pub dashboard: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        UserId(self.user_id)
    }

    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customer_id.map(CustomerId)
    }
}

pub struct JwtService {
    secret: String,
    access_token_expiry: i64,
}

impl JwtService {
    pub fn new(secret: String, access_expiry_seconds: i64) -> Self {
        Self {
            secret,
            access_token_expiry: access_expiry_seconds,
        }
    }

    pub fn generate_access_token(
        &self,
        user_id: UserId,
        customer_id: Option<CustomerId>,
        username: &str,
        dashboard: bool,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            user_id: user_id.0,
            customer_id: customer_id.map(|c| c.as_i64()),
            username: username.to_string(),
            dashboard,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            _ => JwtError::ValidationError(e.to_string()),
        })
    }
}
