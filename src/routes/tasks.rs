use crate::{
    auth::AuthenticatedIdentity,
    error::AppError,
    models::{TaskInput, TaskUpdate},
    services::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use validator::Validate;

/// Lists the tasks of one of the authenticated user's projects.
///
/// ## Path Parameters:
/// - `project_id`: The project whose tasks are listed.
///
/// ## Responses:
/// - `200 OK`: A JSON array of `Task` objects in creation order.
/// - `401 Unauthorized`: Missing or invalid token.
/// - `404 Not Found`: The project does not exist or belongs to another user.
#[get("/{project_id}/tasks")]
pub async fn list_tasks(
    service: web::Data<TaskService>,
    identity: AuthenticatedIdentity,
    project_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let tasks = service
        .list_tasks(&identity, project_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task in one of the authenticated user's projects.
///
/// ## Request Body:
/// - `title`: 1 to 200 characters (required).
/// - `description` (optional): up to 1000 characters.
/// - `due_date` (optional): `YYYY-MM-DD`.
///
/// ## Responses:
/// - `201 Created`: The new `Task`, with `completed` set to `false`.
/// - `404 Not Found`: The project does not exist or belongs to another user.
/// - `422 Unprocessable Entity`: Input validation failed.
#[post("/{project_id}/tasks")]
pub async fn create_task(
    service: web::Data<TaskService>,
    identity: AuthenticatedIdentity,
    project_id: web::Path<i64>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = service
        .create_task(&identity, project_id.into_inner(), task_data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a task by project and task id.
///
/// ## Responses:
/// - `200 OK`: The `Task`.
/// - `404 Not Found`: The task does not exist, is not in this project, or the
///   project belongs to another user.
#[get("/{project_id}/tasks/{id}")]
pub async fn get_task(
    service: web::Data<TaskService>,
    identity: AuthenticatedIdentity,
    path: web::Path<(i64, i64)>,
) -> Result<impl Responder, AppError> {
    let (project_id, task_id) = path.into_inner();
    let task = service.get_task(&identity, project_id, task_id).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Updates a task.
///
/// `title`, `description` and `due_date` are replaced. `completed` is only
/// changed when the body contains it.
///
/// ## Responses:
/// - `200 OK`: The updated `Task`.
/// - `404 Not Found`: See `get_task`.
/// - `422 Unprocessable Entity`: Input validation failed.
#[put("/{project_id}/tasks/{id}")]
pub async fn update_task(
    service: web::Data<TaskService>,
    identity: AuthenticatedIdentity,
    path: web::Path<(i64, i64)>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let (project_id, task_id) = path.into_inner();

    let task = service
        .update_task(&identity, project_id, task_id, task_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `404 Not Found`: See `get_task`.
#[delete("/{project_id}/tasks/{id}")]
pub async fn delete_task(
    service: web::Data<TaskService>,
    identity: AuthenticatedIdentity,
    path: web::Path<(i64, i64)>,
) -> Result<impl Responder, AppError> {
    let (project_id, task_id) = path.into_inner();
    service.delete_task(&identity, project_id, task_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use crate::models::{TaskInput, TaskUpdate};
    use validator::Validate;

    #[test]
    fn test_task_payload_validation() {
        let update = TaskUpdate {
            title: "".to_string(),
            description: None,
            due_date: None,
            completed: Some(true),
        };
        assert!(
            update.validate().is_err(),
            "Validation should fail for empty title."
        );

        let input = TaskInput {
            title: "Valid Title".to_string(),
            description: Some("b".repeat(1000)),
            due_date: None,
        };
        assert!(
            input.validate().is_ok(),
            "A 1000 character description is allowed."
        );
    }
}
