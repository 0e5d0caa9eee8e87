use std::sync::Arc;

use log::info;

use crate::auth::AuthenticatedIdentity;
use crate::guard::{AccessError, OwnershipGuard, Resource};
use crate::models::{NewTask, Task, TaskInput, TaskUpdate};
use crate::store::TaskStore;

/// Task use-cases. Every call re-checks the parent project's owner.
#[derive(Clone)]
pub struct TaskService {
    guard: OwnershipGuard,
    tasks: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(guard: OwnershipGuard, tasks: Arc<dyn TaskStore>) -> Self {
        Self { guard, tasks }
    }

    pub async fn list_tasks(
        &self,
        identity: &AuthenticatedIdentity,
        project_id: i64,
    ) -> Result<Vec<Task>, AccessError> {
        self.guard.authorize_project(identity, project_id).await?;
        Ok(self.tasks.list_tasks(project_id).await?)
    }

    /// Adds a task to one of the caller's projects. New tasks start incomplete.
    pub async fn create_task(
        &self,
        identity: &AuthenticatedIdentity,
        project_id: i64,
        input: TaskInput,
    ) -> Result<Task, AccessError> {
        let project = self.guard.authorize_project(identity, project_id).await?;
        let task = self.tasks.insert_task(NewTask::new(input, project.id)).await?;
        info!(
            "user {} created task {} in project {}",
            identity.user_id, task.id, project.id
        );
        Ok(task)
    }

    pub async fn get_task(
        &self,
        identity: &AuthenticatedIdentity,
        project_id: i64,
        task_id: i64,
    ) -> Result<Task, AccessError> {
        self.guard.authorize_task(identity, project_id, task_id).await
    }

    /// Applies `update` with [`Task::apply`]: `completed` changes only when
    /// the request carries it.
    pub async fn update_task(
        &self,
        identity: &AuthenticatedIdentity,
        project_id: i64,
        task_id: i64,
        update: TaskUpdate,
    ) -> Result<Task, AccessError> {
        let mut task = self.guard.authorize_task(identity, project_id, task_id).await?;
        task.apply(update);

        self.tasks
            .update_task(&task)
            .await?
            .ok_or(AccessError::NotFoundOrForbidden(Resource::Task))
    }

    pub async fn delete_task(
        &self,
        identity: &AuthenticatedIdentity,
        project_id: i64,
        task_id: i64,
    ) -> Result<(), AccessError> {
        self.guard.authorize_task(identity, project_id, task_id).await?;
        if !self.tasks.delete_task(task_id).await? {
            return Err(AccessError::NotFoundOrForbidden(Resource::Task));
        }
        info!(
            "user {} deleted task {} from project {}",
            identity.user_id, task_id, project_id
        );
        Ok(())
    }
}
