use chrono::Duration;
use std::env;
use std::fmt;
use thiserror::Error;

use crate::auth::password::DEFAULT_COST;

const DEFAULT_JWT_EXPIRATION_SECS: i64 = 60 * 60 * 24; // 24 hours
const MAX_JWT_EXPIRATION_SECS: i64 = 60 * 60 * 24 * 365 * 10; // 10 years
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Process-wide settings, read once at startup.
#[derive(Clone)]
pub struct Config {
    /// PostgreSQL URL. Without it the server runs on the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    /// HS256 signing key for identity tokens.
    pub jwt_secret: String,
    pub jwt_expiration: Duration,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let jwt_expiration_secs: i64 =
            parse_var("JWT_EXPIRATION_SECS", DEFAULT_JWT_EXPIRATION_SECS)?;
        if !(1..=MAX_JWT_EXPIRATION_SECS).contains(&jwt_expiration_secs) {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRATION_SECS",
                reason: format!("must be between 1 and {}", MAX_JWT_EXPIRATION_SECS),
            });
        }
        let jwt_expiration =
            Duration::try_seconds(jwt_expiration_secs).ok_or(ConfigError::Invalid {
                name: "JWT_EXPIRATION_SECS",
                reason: "out of range".into(),
            })?;

        let bcrypt_cost: u32 = parse_var("BCRYPT_COST", DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                reason: format!("{} is outside 4..=31", bcrypt_cost),
            });
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            database_max_connections: parse_var(
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
            server_port: parse_var("SERVER_PORT", 8080)?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            jwt_secret,
            jwt_expiration,
            bcrypt_cost,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("database_max_connections", &self.database_max_connections)
            .field("server_port", &self.server_port)
            .field("server_host", &self.server_host)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration", &self.jwt_expiration)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
