//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! All types here are shared by the services and the gateway.

pub mod constants;
pub mod error;
pub mod identity;
pub mod issue;
pub mod password;

pub use constants::*;
pub use error::{DomainError, DomainResult, InvalidInput, IssueField};
pub use identity::{
    role_names_for_tokens, Identity, IdentityResponse, Principal, Role, RoleName, Session,
    UnknownRoleName,
};
pub use issue::{Issue, IssueDraft, IssueFields, Severity};
pub use password::Password;
