use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::AuthenticatedIdentity;
use crate::error::AppError;

/// Extracts the caller's identity from request extensions.
///
/// Handlers behind `AuthMiddleware` take an `AuthenticatedIdentity` argument
/// and pass it on to the services. If the middleware did not run for the
/// route, extraction fails with `AppError::Unauthorized`.
impl FromRequest for AuthenticatedIdentity {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedIdentity>().cloned() {
            Some(identity) => ready(Ok(identity)),
            None => {
                let err = AppError::Unauthorized("Authentication required".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
