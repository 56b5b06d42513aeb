//! Authentication middleware and role gates.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};

use common::{AppError, AppResult};
use domain::{Principal, RoleName, BEARER_TOKEN_PREFIX};

use crate::state::AppState;

/// Roles allowed to create and update issues
pub const ISSUE_WRITERS: &[RoleName] = &[RoleName::User, RoleName::Moderator];

/// Roles allowed to read a single issue
pub const ISSUE_READERS: &[RoleName] = &[RoleName::User, RoleName::Moderator, RoleName::Admin];

/// Roles allowed to list and delete issues
pub const ISSUE_ADMINS: &[RoleName] = &[RoleName::Admin];

/// Fail with `Forbidden` unless the principal holds one of `allowed`.
pub fn require_any_role(principal: &Principal, allowed: &[RoleName]) -> AppResult<()> {
    if principal.has_any_role(allowed) {
        Ok(())
    } else {
        tracing::debug!(username = %principal.username, "Role gate rejected request");
        Err(AppError::Forbidden)
    }
}

/// Authentication middleware that validates bearer tokens.
///
/// On success the recovered `Principal` is placed in the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let principal = {
        let token = extract_token(&request)?;
        state.auth.verify_token(token)?
    };

    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header.
fn extract_token(request: &Request<Body>) -> AppResult<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)
}
