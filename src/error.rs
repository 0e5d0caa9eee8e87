//!
//! # HTTP error mapping
//!
//! This module defines `AppError`, the single error type returned by every
//! request handler. Domain errors (`AuthError`, `AccessError`, `StoreError`)
//! and `validator::ValidationErrors` convert into it with `From`, so handlers
//! can use the `?` operator throughout.
//!
//! `AppError` implements `actix_web::error::ResponseError` and renders every
//! failure as a JSON body of the form `{"kind": ..., "message": ...}`.
//! Server-side failures are logged with their detail and answered with a
//! generic message only.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use log::error;
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::AuthError;
use crate::guard::AccessError;
use crate::store::StoreError;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Represents all possible errors that can occur within the application.
///
/// Each variant corresponds to an HTTP status and carries the message shown
/// to the client (or, for the 500 variants, the detail that gets logged).
#[derive(Debug)]
pub enum AppError {
    /// Authentication failed or is missing (HTTP 401).
    Unauthorized(String),
    /// A malformed request, or a registration conflict (HTTP 400).
    BadRequest(String),
    /// The resource does not exist or is not the caller's (HTTP 404).
    NotFound(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Store failure (HTTP 500).
    DatabaseError(String),
    /// Input failed field validation (HTTP 422 Unprocessable Entity).
    ValidationError(String),
}

impl AppError {
    /// Stable machine-readable tag sent as `kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "unauthorized",
            AppError::BadRequest(_) => "bad_request",
            AppError::NotFound(_) => "not_found",
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => "internal_error",
            AppError::ValidationError(_) => "validation_error",
        }
    }

    /// Message sent to the client. Never includes server-side detail.
    fn public_message(&self) -> &str {
        match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::ValidationError(msg) => msg,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => INTERNAL_MESSAGE,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            error!("{}", self);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "kind": self.kind(),
            "message": self.public_message(),
        }))
    }
}

/// Authentication failures. Login failures share one generic message.
impl From<AuthError> for AppError {
    fn from(error: AuthError) -> AppError {
        match error {
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".into())
            }
            AuthError::EmailTaken => AppError::BadRequest("Email is already in use".into()),
            AuthError::Unauthenticated => {
                AppError::Unauthorized("Invalid or expired token".into())
            }
            AuthError::Hashing(msg) | AuthError::TokenIssue(msg) => {
                AppError::InternalServerError(msg)
            }
            AuthError::Store(e) => e.into(),
        }
    }
}

/// Ownership failures become a plain 404.
impl From<AccessError> for AppError {
    fn from(error: AccessError) -> AppError {
        match error {
            AccessError::NotFoundOrForbidden(resource) => AppError::NotFound(format!(
                "{} not found or access denied",
                capitalize(&resource.to_string())
            )),
            AccessError::Store(e) => e.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        AppError::DatabaseError(error.to_string())
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
