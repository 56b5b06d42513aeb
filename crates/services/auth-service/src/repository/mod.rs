//! Repository layer for identity and role data access.

pub mod entities;
mod identity_repository;
mod role_repository;

pub use identity_repository::{DbIdentityStore, IdentityStore};
pub use role_repository::{DbRoleCatalog, RoleCatalog};

#[cfg(any(test, feature = "test-utils"))]
pub use identity_repository::MockIdentityStore;
#[cfg(any(test, feature = "test-utils"))]
pub use role_repository::MockRoleCatalog;
