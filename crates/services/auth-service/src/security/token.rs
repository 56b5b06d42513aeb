//! Bearer token issuance and verification (HS256 JWT).

use std::collections::BTreeSet;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{AppError, AppResult, JwtConfig};
use domain::{Principal, RoleName, SECONDS_PER_HOUR};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id
    pub sub: Uuid,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Recover the authenticated principal.
    ///
    /// A token naming a role outside the catalog is rejected.
    pub fn into_principal(self) -> AppResult<Principal> {
        let roles = self
            .roles
            .iter()
            .map(|name| name.parse::<RoleName>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(|_| AppError::Unauthorized)?;

        Ok(Principal {
            id: self.sub,
            username: self.username,
            roles,
        })
    }
}

/// Who a token is being issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

/// A freshly signed token and its lifetime in seconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, subject: &TokenSubject) -> AppResult<IssuedToken>;
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenVerifier: Send + Sync {
    /// Check signature and expiry, returning the claims
    fn verify(&self, token: &str) -> AppResult<Claims>;
}

/// HS256 token signer and verifier.
pub struct JwtTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiration_hours: i64,
}

impl JwtTokens {
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            expiration_hours: config.expiration_hours,
        }
    }
}

impl TokenIssuer for JwtTokens {
    fn issue(&self, subject: &TokenSubject) -> AppResult<IssuedToken> {
        let lifetime = Duration::try_hours(self.expiration_hours)
            .ok_or_else(|| AppError::internal("Token lifetime out of range"))?;
        let expires_in = self
            .expiration_hours
            .checked_mul(SECONDS_PER_HOUR)
            .ok_or_else(|| AppError::internal("Token lifetime out of range"))?;

        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| AppError::internal("Token expiry out of range"))?;

        let claims = Claims {
            sub: subject.id,
            username: subject.username.clone(),
            email: subject.email.clone(),
            roles: subject.roles.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)?;

        Ok(IssuedToken { token, expires_in })
    }
}

impl TokenVerifier for JwtTokens {
    fn verify(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(token_data.claims)
    }
}
