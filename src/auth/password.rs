use crate::auth::AuthError;
use bcrypt::{hash, verify};

/// Work factor used when none is configured.
pub const DEFAULT_COST: u32 = 12;

/// Salted, adaptive one-way password hashing (bcrypt).
///
/// Every call to [`PasswordHasher::hash`] draws a fresh salt, so hashing the
/// same plaintext twice yields two different strings. The cost is fixed at
/// startup from configuration.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        hash(password, self.cost)
            .map_err(|e| AuthError::Hashing(format!("Failed to hash password: {}", e)))
    }

    pub fn verify(&self, password: &str, hashed_password: &str) -> Result<bool, AuthError> {
        verify(password, hashed_password)
            .map_err(|e| AuthError::Hashing(format!("Failed to verify password: {}", e)))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}
