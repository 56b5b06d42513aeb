//! Auth service configuration.

use std::env;

use common::{AppError, AppResult, JwtConfig};
use domain::{DEFAULT_JWT_EXPIRATION_HOURS, MAX_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH};

/// Insecure signing key used only by debug builds when `JWT_SECRET` is unset
const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Auth service configuration.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    pub jwt: JwtConfig,
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `JWT_SECRET` (minimum 32 characters) and `JWT_EXPIRATION_HOURS`
    /// (1 to 8760).
    pub fn from_env() -> AppResult<Self> {
        Self::build(
            env::var("JWT_SECRET").ok(),
            env::var("JWT_EXPIRATION_HOURS").ok(),
        )
    }

    fn build(secret: Option<String>, expiration_hours: Option<String>) -> AppResult<Self> {
        let secret = match secret {
            Some(secret) => secret,
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            None => return Err(AppError::internal("JWT_SECRET must be set in production")),
        };

        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        let expiration_hours = expiration_hours
            .and_then(|h| h.parse().ok())
            .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS);

        if !(1..=MAX_JWT_EXPIRATION_HOURS).contains(&expiration_hours) {
            return Err(AppError::internal(format!(
                "JWT_EXPIRATION_HOURS must be between 1 and {}, got {}",
                MAX_JWT_EXPIRATION_HOURS, expiration_hours
            )));
        }

        Ok(Self {
            jwt: JwtConfig {
                secret,
                expiration_hours,
            },
        })
    }
}
