pub mod errors;
pub mod extractors;
pub mod identity;
pub mod middleware;
pub mod password;
pub mod token;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// Re-export necessary items
pub use errors::AuthError;
pub use identity::{AuthenticatedIdentity, Authentication, IdentityResolver};
pub use middleware::AuthMiddleware;
pub use password::PasswordHasher;
pub use token::{Claims, TokenCodec, TokenError};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// User's password. Only presence is checked here; a wrong password of
    /// any length is reported as invalid credentials.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// At least 6 characters and at most 72 bytes, the most bcrypt will hash.
    #[validate(length(min = 6), custom = "validate_bcrypt_length")]
    pub password: String,
}

/// Longest input bcrypt uses; anything after this many bytes is dropped.
const BCRYPT_MAX_BYTES: usize = 72;

fn validate_bcrypt_length(password: &str) -> Result<(), ValidationError> {
    if password.len() > BCRYPT_MAX_BYTES {
        let mut error = ValidationError::new("password_too_long");
        error.message = Some("Password must be at most 72 bytes".into());
        return Err(error);
    }
    Ok(())
}

/// Response body after a successful registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

/// Response structure after successful login.
/// Contains the JWT access token and the authenticated user's identity.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT (JSON Web Token) to send as `Authorization: Bearer <token>`.
    pub token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// The unique identifier of the authenticated user.
    pub id: i64,
    pub email: String,
    pub roles: Vec<String>,
}

impl From<Authentication> for AuthResponse {
    fn from(auth: Authentication) -> Self {
        Self {
            token: auth.token,
            token_type: "Bearer".to_string(),
            expires_at: auth.expires_at,
            id: auth.identity.user_id,
            email: auth.identity.email,
            roles: auth.identity.roles,
        }
    }
}
