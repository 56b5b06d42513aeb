//! Middleware for authentication and role checks.

mod auth;

pub use auth::{auth_middleware, require_any_role, ISSUE_ADMINS, ISSUE_READERS, ISSUE_WRITERS};
