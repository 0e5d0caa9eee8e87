use serde::Serialize;
use sqlx::FromRow;

/// A registered account as persisted by the credential store.
///
/// The password hash never leaves the service: it is skipped on serialization
/// and only read back by the identity resolver when verifying a login.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    /// Unique, immutable identifier assigned by the store.
    pub id: i64,
    /// Normalized (trimmed, lowercase) email address. Unique across users.
    pub email: String,
    /// bcrypt hash of the user's password.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// A user record that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}
