//! Identity resolution: registration, login and bearer-token resolution.
//!
//! [`IdentityResolver`] is the only place that turns credentials or tokens
//! into an [`AuthenticatedIdentity`]. The identity it returns is a plain value
//! that the HTTP layer stores in the request and hands explicitly to the
//! ownership guard and the resource services.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Serialize;

use crate::auth::password::PasswordHasher;
use crate::auth::token::{Claims, TokenCodec, TokenError, DEFAULT_ROLE};
use crate::auth::AuthError;
use crate::models::{NewUser, User};
use crate::store::{CredentialStore, StoreError};

/// Verified caller of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedIdentity {
    pub user_id: i64,
    pub email: String,
    pub roles: Vec<String>,
}

impl TryFrom<Claims> for AuthenticatedIdentity {
    type Error = TokenError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email,
            roles: claims.roles,
        })
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct Authentication {
    pub identity: AuthenticatedIdentity,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Emails are compared case-insensitively: trimmed and lowercased before
/// every lookup and before storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct IdentityResolver {
    credentials: Arc<dyn CredentialStore>,
    codec: TokenCodec,
    hasher: PasswordHasher,
    // Verified against when the email is unknown, so both login failures
    // cost one bcrypt round.
    dummy_hash: String,
}

impl IdentityResolver {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        codec: TokenCodec,
        hasher: PasswordHasher,
    ) -> Result<Self, AuthError> {
        let dummy_hash = hasher.hash("projecttasks-unknown-account")?;
        Ok(Self {
            credentials,
            codec,
            hasher,
            dummy_hash,
        })
    }

    /// Creates an account.
    ///
    /// The `exists_by_email` lookup only short-circuits the common case. Two
    /// concurrent registrations can both pass it; the store's unique
    /// constraint then rejects the second insert, which is reported as the
    /// same [`AuthError::EmailTaken`].
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email);
        if self.credentials.exists_by_email(&email).await? {
            debug!("registration rejected: email already present");
            return Err(AuthError::EmailTaken);
        }

        let hasher = self.hasher;
        let password = password.to_owned();
        let password_hash = run_blocking(move || hasher.hash(&password)).await?;

        match self
            .credentials
            .save(NewUser {
                email,
                password_hash,
            })
            .await
        {
            Ok(user) => {
                info!("registered user {}", user.id);
                Ok(user)
            }
            Err(StoreError::UniqueViolation(constraint)) => {
                debug!("registration lost a race on {}", constraint);
                Err(AuthError::EmailTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Verifies an email/password pair and mints a token.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Authentication, AuthError> {
        self.authenticate_at(email, password, Utc::now()).await
    }

    /// [`authenticate`](Self::authenticate) with an explicit clock.
    pub async fn authenticate_at(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Authentication, AuthError> {
        let email = normalize_email(email);
        let user = self.credentials.find_by_email(&email).await?;

        let stored_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.clone(),
        };
        let hasher = self.hasher;
        let password = password.to_owned();
        let matches = run_blocking(move || hasher.verify(&password, &stored_hash)).await?;

        let user = match user {
            Some(user) if matches => user,
            _ => {
                warn!("rejected login attempt");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let roles = vec![DEFAULT_ROLE.to_string()];
        let expires_at = now
            .checked_add_signed(self.codec.ttl())
            .ok_or_else(|| AuthError::TokenIssue("token expiry is out of range".into()))?;
        let token = self
            .codec
            .issue(user.id, &user.email, &roles, now)
            .map_err(|e| AuthError::TokenIssue(e.to_string()))?;
        info!("user {} logged in", user.id);

        Ok(Authentication {
            identity: AuthenticatedIdentity {
                user_id: user.id,
                email: user.email,
                roles,
            },
            token,
            expires_at,
        })
    }

    /// Resolves a bearer token to the caller's identity.
    pub fn resolve(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError> {
        self.resolve_at(token, Utc::now())
    }

    /// [`resolve`](Self::resolve) with an explicit clock.
    ///
    /// Every [`TokenError`] collapses into [`AuthError::Unauthenticated`].
    pub fn resolve_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedIdentity, AuthError> {
        self.codec
            .verify(token, now)
            .and_then(AuthenticatedIdentity::try_from)
            .map_err(|e| {
                debug!("bearer token refused: {}", e);
                AuthError::Unauthenticated
            })
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, AuthError>
where
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AuthError::Hashing(format!("hashing task did not complete: {}", e)))?
}
