use crate::{
    auth::AuthenticatedIdentity, error::AppError, models::ProjectInput,
    services::ProjectService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use validator::Validate;

/// Lists the authenticated user's projects, newest first.
///
/// ## Responses:
/// - `200 OK`: A JSON array of `ProjectView` objects.
/// - `401 Unauthorized`: Missing or invalid token.
#[get("")]
pub async fn list_projects(
    service: web::Data<ProjectService>,
    identity: AuthenticatedIdentity,
) -> Result<impl Responder, AppError> {
    let projects = service.list_projects(&identity).await?;
    Ok(HttpResponse::Ok().json(projects))
}

/// Creates a project owned by the authenticated user.
///
/// ## Responses:
/// - `201 Created`: The new `ProjectView` (task counts are zero).
/// - `401 Unauthorized`: Missing or invalid token.
/// - `422 Unprocessable Entity`: Title or description fails validation.
#[post("")]
pub async fn create_project(
    service: web::Data<ProjectService>,
    identity: AuthenticatedIdentity,
    project_data: web::Json<ProjectInput>,
) -> Result<impl Responder, AppError> {
    project_data.validate()?;

    let project = service
        .create_project(&identity, project_data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(project))
}

/// Retrieves one project.
///
/// ## Responses:
/// - `200 OK`: The `ProjectView`.
/// - `404 Not Found`: The project does not exist or belongs to another user.
#[get("/{id}")]
pub async fn get_project(
    service: web::Data<ProjectService>,
    identity: AuthenticatedIdentity,
    project_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let project = service
        .get_project(&identity, project_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(project))
}

/// Replaces a project's title and description.
///
/// ## Responses:
/// - `200 OK`: The updated `ProjectView`.
/// - `404 Not Found`: The project does not exist or belongs to another user.
/// - `422 Unprocessable Entity`: Title or description fails validation.
#[put("/{id}")]
pub async fn update_project(
    service: web::Data<ProjectService>,
    identity: AuthenticatedIdentity,
    project_id: web::Path<i64>,
    project_data: web::Json<ProjectInput>,
) -> Result<impl Responder, AppError> {
    project_data.validate()?;

    let project = service
        .update_project(&identity, project_id.into_inner(), project_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(project))
}

/// Deletes a project and all of its tasks.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `404 Not Found`: The project does not exist or belongs to another user.
#[delete("/{id}")]
pub async fn delete_project(
    service: web::Data<ProjectService>,
    identity: AuthenticatedIdentity,
    project_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    service
        .delete_project(&identity, project_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
