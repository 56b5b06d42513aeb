//! SeaORM entity definitions for identities and roles.
//!
//! These are database-specific entities separate from domain models.

pub mod role;
pub mod user;
pub mod user_role;
