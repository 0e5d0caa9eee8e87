//! Authentication failures surfaced by the identity resolver.
//!
//! The three caller-facing variants are deliberately coarse. Unknown email and
//! wrong password are both `InvalidCredentials`, and every token problem is
//! `Unauthenticated`, so callers cannot probe for accounts or learn why a
//! token was refused.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Login with an unknown email or a wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Registration for an email that already has an account.
    #[error("email is already in use")]
    EmailTaken,

    /// Missing, malformed, tampered or expired bearer token.
    #[error("authentication required")]
    Unauthenticated,

    /// bcrypt failed to hash or to parse a stored hash.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// The token codec could not sign a new token.
    #[error("token issuance failed: {0}")]
    TokenIssue(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
