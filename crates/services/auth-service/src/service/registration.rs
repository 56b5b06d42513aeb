//! Registration of new identities.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use common::AppResult;
use domain::{DomainError, Identity};

use super::RoleResolver;
use crate::repository::IdentityStore;
use crate::security::CredentialHasher;

pub struct Registrar {
    identities: Arc<dyn IdentityStore>,
    hasher: Arc<dyn CredentialHasher>,
    roles: RoleResolver,
}

impl Registrar {
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        hasher: Arc<dyn CredentialHasher>,
        roles: RoleResolver,
    ) -> Self {
        Self {
            identities,
            hasher,
            roles,
        }
    }

    /// Create a new identity.
    ///
    /// Username uniqueness is checked before email uniqueness. Only the hash
    /// of `password` is stored.
    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
        requested_roles: Option<HashSet<String>>,
    ) -> AppResult<Identity> {
        if self.identities.exists_by_username(&username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }

        if self.identities.exists_by_email(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let credential_hash = self.hasher.hash(&password)?;
        let roles = self.roles.resolve(requested_roles.as_ref()).await?;

        let identity = self
            .identities
            .save(Identity::new(username, email, credential_hash, roles))
            .await?;

        info!(identity_id = %identity.id, username = %identity.username, "Registered new identity");
        Ok(identity)
    }
}
