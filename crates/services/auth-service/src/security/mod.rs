//! Cryptographic collaborators: credential hashing and bearer tokens.

mod hasher;
mod token;

pub use hasher::{Argon2Hasher, CredentialHasher};
pub use token::{Claims, IssuedToken, JwtTokens, TokenIssuer, TokenSubject, TokenVerifier};

#[cfg(any(test, feature = "test-utils"))]
pub use hasher::MockCredentialHasher;
#[cfg(any(test, feature = "test-utils"))]
pub use token::{MockTokenIssuer, MockTokenVerifier};
