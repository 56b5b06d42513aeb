//! Credential authentication and session issuance.

use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::{info, warn};

use common::AppResult;
use domain::{DomainError, Password, Session, TOKEN_TYPE_BEARER};

use crate::repository::IdentityStore;
use crate::security::{CredentialHasher, TokenIssuer, TokenSubject};

/// Real argon2 hash that no password matches, verified when the username
/// is unknown so both failure paths cost the same.
static DUMMY_HASH: Lazy<String> = Lazy::new(|| {
    Password::new("unmatched-dummy-credential")
        .map(Password::into_string)
        .unwrap_or_default()
});

pub struct CredentialAuthenticator {
    identities: Arc<dyn IdentityStore>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl CredentialAuthenticator {
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            identities,
            hasher,
            tokens,
        }
    }

    /// Verify credentials and open a session.
    ///
    /// Unknown username and wrong password fail identically with
    /// `AuthenticationFailure`.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<Session> {
        let identity = self.identities.find_by_username(username).await?;

        let stored_hash = identity
            .as_ref()
            .map_or(DUMMY_HASH.as_str(), |identity| identity.credential_hash.as_str());
        let password_valid = self.hasher.verify(password, stored_hash);

        let identity = match identity {
            Some(identity) if password_valid => identity,
            _ => {
                warn!(username = %username, "Authentication failed");
                return Err(DomainError::AuthenticationFailure.into());
            }
        };

        let roles: Vec<String> = identity
            .role_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();

        let issued = self.tokens.issue(&TokenSubject {
            id: identity.id,
            username: identity.username.clone(),
            email: identity.email.clone(),
            roles: roles.clone(),
        })?;

        info!(identity_id = %identity.id, "Session opened");

        Ok(Session {
            token: issued.token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: issued.expires_in,
            id: identity.id,
            username: identity.username,
            email: identity.email,
            roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::repository::MockIdentityStore;
    use crate::security::{IssuedToken, MockCredentialHasher, MockTokenIssuer};
    use common::AppError;
    use domain::{Identity, Role, RoleName};

    fn stored_identity() -> Identity {
        Identity::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "stored-hash".to_string(),
            BTreeSet::from([
                Role { id: 1, name: RoleName::User },
                Role { id: 3, name: RoleName::Admin },
            ]),
        )
    }

    fn hasher_accepting(secret: &'static str) -> MockCredentialHasher {
        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_verify()
            .returning(move |raw, hash| raw == secret && hash == "stored-hash");
        hasher
    }

    fn issuer() -> MockTokenIssuer {
        let mut issuer = MockTokenIssuer::new();
        issuer.expect_issue().returning(|_| {
            Ok(IssuedToken {
                token: "signed.jwt.token".to_string(),
                expires_in: 86_400,
            })
        });
        issuer
    }

    #[tokio::test]
    async fn test_valid_credentials_open_session() {
        let identity = stored_identity();
        let expected_id = identity.id;

        let mut store = MockIdentityStore::new();
        store
            .expect_find_by_username()
            .withf(|username| username == "alice")
            .returning(move |_| Ok(Some(identity.clone())));

        let mut issuer = MockTokenIssuer::new();
        issuer
            .expect_issue()
            .withf(move |subject| {
                subject.id == expected_id
                    && subject.roles == vec!["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()]
            })
            .times(1)
            .returning(|_| {
                Ok(IssuedToken {
                    token: "signed.jwt.token".to_string(),
                    expires_in: 86_400,
                })
            });

        let authenticator = CredentialAuthenticator::new(
            Arc::new(store),
            Arc::new(hasher_accepting("s3cret!")),
            Arc::new(issuer),
        );

        let session = authenticator.authenticate("alice", "s3cret!").await.unwrap();

        assert_eq!(session.token, "signed.jwt.token");
        assert_eq!(session.token_type, "Bearer");
        assert_eq!(session.expires_in, 86_400);
        assert_eq!(session.id, expected_id);
        assert_eq!(session.email, "alice@example.com");
        assert_eq!(session.roles, vec!["ROLE_USER", "ROLE_ADMIN"]);
    }

    #[tokio::test]
    async fn test_wrong_password_fails_without_token() {
        let identity = stored_identity();
        let mut store = MockIdentityStore::new();
        store
            .expect_find_by_username()
            .returning(move |_| Ok(Some(identity.clone())));

        let mut issuer = MockTokenIssuer::new();
        issuer.expect_issue().never();

        let authenticator = CredentialAuthenticator::new(
            Arc::new(store),
            Arc::new(hasher_accepting("s3cret!")),
            Arc::new(issuer),
        );

        let err = authenticator.authenticate("alice", "wrong").await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::AuthenticationFailure)));
    }

    #[tokio::test]
    async fn test_unknown_username_still_verifies_against_dummy() {
        let mut store = MockIdentityStore::new();
        store.expect_find_by_username().returning(|_| Ok(None));

        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_verify()
            .withf(|_, hash| hash.starts_with("$argon2"))
            .times(1)
            .returning(|_, _| false);

        let mut issuer = MockTokenIssuer::new();
        issuer.expect_issue().never();

        let authenticator =
            CredentialAuthenticator::new(Arc::new(store), Arc::new(hasher), Arc::new(issuer));

        let err = authenticator.authenticate("ghost", "s3cret!").await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::AuthenticationFailure)));
    }

    #[tokio::test]
    async fn test_failure_kinds_are_indistinguishable() {
        let identity = stored_identity();
        let mut store = MockIdentityStore::new();
        store
            .expect_find_by_username()
            .returning(move |username| Ok((username == "alice").then(|| identity.clone())));

        let authenticator = CredentialAuthenticator::new(
            Arc::new(store),
            Arc::new(hasher_accepting("s3cret!")),
            Arc::new(issuer()),
        );

        let unknown = authenticator.authenticate("ghost", "s3cret!").await.unwrap_err();
        let mismatch = authenticator.authenticate("alice", "nope").await.unwrap_err();

        assert_eq!(unknown.code(), mismatch.code());
        assert_eq!(unknown.to_string(), mismatch.to_string());
    }
}
