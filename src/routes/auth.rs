use crate::{
    auth::{AuthResponse, IdentityResolver, LoginRequest, RegisterRequest, RegisterResponse},
    error::AppError,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new account. Does not log the user in; call `/login` next.
///
/// ## Responses:
/// - `201 Created`: `{message, user_id}`.
/// - `400 Bad Request`: The email is already registered, or the body is malformed.
/// - `422 Unprocessable Entity`: Invalid email format or password length.
#[post("/register")]
pub async fn register(
    resolver: web::Data<IdentityResolver>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let user = resolver
        .register(&register_data.email, &register_data.password)
        .await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".into(),
        user_id: user.id,
    }))
}

/// Login user
///
/// Authenticates a user and returns a bearer token.
///
/// ## Responses:
/// - `200 OK`: An `AuthResponse`.
/// - `401 Unauthorized`: Unknown email or wrong password (same body for both).
/// - `422 Unprocessable Entity`: Invalid email format or empty password.
#[post("/login")]
pub async fn login(
    resolver: web::Data<IdentityResolver>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let authentication = resolver
        .authenticate(&login_data.email, &login_data.password)
        .await?;

    Ok(HttpResponse::Ok().json(AuthResponse::from(authentication)))
}
