//! Authentication service facade used by the HTTP layer.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use common::AppResult;
use domain::{Identity, Principal, Session};

use super::{CredentialAuthenticator, Registrar, RoleResolver};
use crate::repository::{IdentityStore, RoleCatalog};
use crate::security::{CredentialHasher, TokenIssuer, TokenVerifier};

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new identity
    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
        requested_roles: Option<HashSet<String>>,
    ) -> AppResult<Identity>;

    /// Check credentials and issue a session token
    async fn authenticate(&self, username: String, password: String) -> AppResult<Session>;

    /// Verify a bearer token and recover the caller
    fn verify_token(&self, token: &str) -> AppResult<Principal>;
}

/// Concrete `AuthService` wiring registration, login and token checks.
pub struct AuthManager {
    registrar: Registrar,
    authenticator: CredentialAuthenticator,
    verifier: Arc<dyn TokenVerifier>,
}

impl AuthManager {
    pub fn new<T>(
        identities: Arc<dyn IdentityStore>,
        catalog: Arc<dyn RoleCatalog>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<T>,
    ) -> Self
    where
        T: TokenIssuer + TokenVerifier + 'static,
    {
        Self {
            registrar: Registrar::new(
                identities.clone(),
                hasher.clone(),
                RoleResolver::new(catalog),
            ),
            authenticator: CredentialAuthenticator::new(identities, hasher, tokens.clone()),
            verifier: tokens,
        }
    }
}

#[async_trait]
impl AuthService for AuthManager {
    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
        requested_roles: Option<HashSet<String>>,
    ) -> AppResult<Identity> {
        self.registrar
            .register(username, email, password, requested_roles)
            .await
    }

    async fn authenticate(&self, username: String, password: String) -> AppResult<Session> {
        self.authenticator.authenticate(&username, &password).await
    }

    fn verify_token(&self, token: &str) -> AppResult<Principal> {
        self.verifier.verify(token)?.into_principal()
    }
}
