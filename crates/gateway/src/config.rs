//! Gateway configuration.

use std::env;

use auth_service::config::AuthServiceConfig;
use common::{AppError, AppResult, DatabaseConfig, ServerConfig};

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthServiceConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` is required outside debug builds.
    pub fn from_env() -> AppResult<Self> {
        let defaults = ServerConfig::default();
        let server = ServerConfig {
            host: env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
        };

        Ok(Self {
            server,
            database: database_from_env()?,
            auth: AuthServiceConfig::from_env()?,
        })
    }
}

fn database_from_env() -> AppResult<DatabaseConfig> {
    let defaults = DatabaseConfig::default();

    let url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("DATABASE_URL not set, using local development database");
            defaults.url
        }
        Err(_) => return Err(AppError::internal("DATABASE_URL must be set in production")),
    };

    Ok(DatabaseConfig {
        url,
        max_connections: env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|n| n.parse().ok())
            .unwrap_or(defaults.max_connections),
        min_connections: env::var("DATABASE_MIN_CONNECTIONS")
            .ok()
            .and_then(|n| n.parse().ok())
            .unwrap_or(defaults.min_connections),
    })
}
