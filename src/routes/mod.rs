pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::auth::AuthMiddleware;
use crate::error::AppError;
use crate::state::AppState;

/// API routes, mounted under `/api` by [`configure_app`].
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register),
    )
    .service(
        web::scope("/projects")
            .service(projects::list_projects)
            .service(projects::create_project)
            .service(projects::get_project)
            .service(projects::update_project)
            .service(projects::delete_project)
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}

/// Registers application state, extractor settings, `/health` and the
/// token-protected `/api` scope.
///
/// Usage: `App::new().configure(routes::configure_app(state))`.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(state.identity)
            .app_data(state.projects)
            .app_data(state.tasks)
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(
                web::PathConfig::default()
                    .error_handler(|_, _| AppError::NotFound("Resource not found".into()).into()),
            )
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(config),
            );
    }
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid request body: {}", err)).into()
}
