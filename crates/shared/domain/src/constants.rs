//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Canonical name of the default role
pub const ROLE_USER: &str = "ROLE_USER";

/// Canonical name of the moderator role
pub const ROLE_MODERATOR: &str = "ROLE_MODERATOR";

/// Canonical name of the administrator role
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Signup token requesting the administrator role
pub const ROLE_TOKEN_ADMIN: &str = "admin";

/// Signup token requesting the moderator role
pub const ROLE_TOKEN_MODERATOR: &str = "mod";

// =============================================================================
// Issue field limits
// =============================================================================

pub const MAX_TITLE_LENGTH: usize = 50;

pub const MAX_DESCRIPTION_LENGTH: usize = 200;

pub const MAX_STATUS_LENGTH: usize = 50;

pub const MAX_RESPONSIBLE_LENGTH: usize = 50;

// =============================================================================
// Identity column limits
// =============================================================================

/// Maximum username length (matches the `users.username` column)
pub const MAX_USERNAME_LENGTH: u32 = 20;

/// Maximum email length (matches the `users.email` column)
pub const MAX_EMAIL_LENGTH: u32 = 50;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Longest accepted JWT lifetime in hours (one year)
pub const MAX_JWT_EXPIRATION_HOURS: i64 = 8760;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
