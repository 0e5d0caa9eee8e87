use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::IdentityResolver;
use crate::error::AppError;

/// Paths under the protected scope that are reachable without a token.
const PUBLIC_PATHS: [&str; 2] = ["/api/auth/login", "/api/auth/register"];

/// Resolves the bearer token of every protected request and stores the
/// resulting [`AuthenticatedIdentity`](crate::auth::AuthenticatedIdentity) in
/// the request extensions.
///
/// Rejected requests are answered here with the JSON error body and never
/// reach the wrapped service.
///
/// Requires `web::Data<IdentityResolver>` in the app data.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if PUBLIC_PATHS.iter().any(|public| req.path() == *public) {
            return self.forward(req);
        }

        let resolver = match req.app_data::<web::Data<IdentityResolver>>() {
            Some(resolver) => resolver.clone(),
            None => {
                return reject(
                    req,
                    AppError::InternalServerError("IdentityResolver is not registered".into()),
                );
            }
        };

        let outcome = match bearer_token(&req) {
            Some(token) => resolver.resolve(token).map_err(AppError::from),
            None => Err(AppError::Unauthorized("Missing bearer token".into())),
        };

        match outcome {
            Ok(identity) => {
                req.extensions_mut().insert(identity);
                self.forward(req)
            }
            Err(app_err) => reject(req, app_err),
        }
    }
}

impl<S, B> AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    fn forward(
        &self,
        req: ServiceRequest,
    ) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}

fn reject<B: 'static>(
    req: ServiceRequest,
    app_err: AppError,
) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
    let response = req.error_response(app_err).map_into_right_body();
    Box::pin(async move { Ok(response) })
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
