//! Authentication business logic.

mod auth_service;
mod authenticator;
mod registration;
mod role_resolver;

pub use auth_service::{AuthManager, AuthService};
pub use authenticator::CredentialAuthenticator;
pub use registration::Registrar;
pub use role_resolver::RoleResolver;

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
