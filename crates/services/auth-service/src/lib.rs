//! Auth Service Library
//!
//! Identity registration, credential authentication and bearer token
//! verification. Persistence goes through SeaORM; tokens are HS256 JWTs.

pub mod config;
pub mod repository;
pub mod security;
pub mod service;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AuthServiceConfig;
use crate::repository::{DbIdentityStore, DbRoleCatalog};
use crate::security::{Argon2Hasher, JwtTokens};

pub use crate::service::{AuthManager, AuthService};

/// Build the production auth service over a database connection.
pub fn build_auth_service(db: DatabaseConnection, config: &AuthServiceConfig) -> Arc<dyn AuthService> {
    Arc::new(AuthManager::new(
        Arc::new(DbIdentityStore::new(db.clone())),
        Arc::new(DbRoleCatalog::new(db)),
        Arc::new(Argon2Hasher),
        Arc::new(JwtTokens::new(&config.jwt)),
    ))
}
