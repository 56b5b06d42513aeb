//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use std::fmt;

use thiserror::Error;

use crate::identity::RoleName;

/// Required issue fields, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueField {
    Title,
    Description,
    Status,
    Responsible,
}

impl IssueField {
    /// Fields in the order they are validated
    pub const ALL: [IssueField; 4] = [
        IssueField::Title,
        IssueField::Description,
        IssueField::Status,
        IssueField::Responsible,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IssueField::Title => "Title",
            IssueField::Description => "Description",
            IssueField::Status => "Status",
            IssueField::Responsible => "Responsible",
        }
    }
}

impl fmt::Display for IssueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What was wrong with the caller's input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("{0} cannot be null or empty")]
    Missing(IssueField),

    #[error("{field} cannot exceed {max} characters")]
    TooLong { field: IssueField, max: usize },

    #[error("Issue Id cannot be null")]
    IssueId,
}

impl InvalidInput {
    /// The offending issue field, if the error is about a field
    pub fn field(&self) -> Option<IssueField> {
        match self {
            InvalidInput::Missing(field) | InvalidInput::TooLong { field, .. } => Some(*field),
            InvalidInput::IssueId => None,
        }
    }
}

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Request data failed validation
    #[error("{0}")]
    InvalidInput(#[from] InvalidInput),

    /// Requested issue does not exist
    #[error("Issue not found")]
    ResourceNotFound,

    #[error("Username is already taken")]
    UsernameAlreadyExists,

    #[error("Email is already in use")]
    EmailAlreadyExists,

    /// The role catalog is missing a canonical role (misconfiguration)
    #[error("Role not found: {0}")]
    RoleNotFound(RoleName),

    /// Unknown username or wrong password
    #[error("Bad credentials")]
    AuthenticationFailure,

    /// Password hashing failed
    #[error("Password error: {0}")]
    Password(String),
}

impl DomainError {
    /// Stable machine-readable code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidInput(_) => "INVALID_INPUT",
            DomainError::ResourceNotFound => "RESOURCE_NOT_FOUND",
            DomainError::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            DomainError::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            DomainError::RoleNotFound(_) => "ROLE_NOT_FOUND",
            DomainError::AuthenticationFailure => "AUTHENTICATION_FAILURE",
            DomainError::Password(_) => "PASSWORD_ERROR",
        }
    }

    /// Create a password error
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
