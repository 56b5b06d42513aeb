//! Identity domain entity, roles and the authenticated principal.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    ROLE_ADMIN, ROLE_MODERATOR, ROLE_TOKEN_ADMIN, ROLE_TOKEN_MODERATOR, ROLE_USER,
};

/// Closed set of role names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum RoleName {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_MODERATOR")]
    Moderator,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl RoleName {
    /// Map a signup role token to a role name.
    ///
    /// Matching is case-sensitive; every unknown token means `User`.
    pub fn from_token(token: &str) -> Self {
        match token {
            ROLE_TOKEN_ADMIN => RoleName::Admin,
            ROLE_TOKEN_MODERATOR => RoleName::Moderator,
            _ => RoleName::User,
        }
    }

    /// Canonical name as stored in the role catalog
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::User => ROLE_USER,
            RoleName::Moderator => ROLE_MODERATOR,
            RoleName::Admin => ROLE_ADMIN,
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a canonical role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role name: {0}")]
pub struct UnknownRoleName(pub String);

impl FromStr for RoleName {
    type Err = UnknownRoleName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_USER => Ok(RoleName::User),
            ROLE_MODERATOR => Ok(RoleName::Moderator),
            ROLE_ADMIN => Ok(RoleName::Admin),
            other => Err(UnknownRoleName(other.to_string())),
        }
    }
}

/// Resolve requested signup tokens to the set of role names they grant.
///
/// No tokens (absent or empty) grants `User` only.
pub fn role_names_for_tokens<'a, I>(tokens: I) -> BTreeSet<RoleName>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut names: BTreeSet<RoleName> = tokens.into_iter().map(RoleName::from_token).collect();
    if names.is_empty() {
        names.insert(RoleName::User);
    }
    names
}

/// Canonical role record from the role catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Role {
    pub id: i32,
    pub name: RoleName,
}

/// Registered user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub credential_hash: String,
    pub roles: BTreeSet<Role>,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Create a new identity with a fresh id
    pub fn new(
        username: String,
        email: String,
        credential_hash: String,
        roles: BTreeSet<Role>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            credential_hash,
            roles,
            created_at: Utc::now(),
        }
    }

    /// Names of the roles currently assigned
    pub fn role_names(&self) -> BTreeSet<RoleName> {
        self.roles.iter().map(|role| role.name).collect()
    }
}

/// Identity summary (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IdentityResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Identity> for IdentityResponse {
    fn from(identity: Identity) -> Self {
        let roles = identity
            .role_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();

        Self {
            id: identity.id,
            username: identity.username,
            email: identity.email,
            roles,
            created_at: identity.created_at,
        }
    }
}

/// Result of a successful login: bearer token plus identity summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Session {
    /// Signed bearer token
    pub token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Canonical names of the roles currently assigned
    pub roles: Vec<String>,
}

/// Authenticated caller recovered from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
    pub roles: BTreeSet<RoleName>,
}

impl Principal {
    pub fn has_role(&self, name: RoleName) -> bool {
        self.roles.contains(&name)
    }

    /// True if the principal holds at least one of `allowed`
    pub fn has_any_role(&self, allowed: &[RoleName]) -> bool {
        allowed.iter().any(|name| self.has_role(*name))
    }
}
