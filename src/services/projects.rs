use std::sync::Arc;

use log::info;

use crate::auth::AuthenticatedIdentity;
use crate::guard::{AccessError, OwnershipGuard, Resource};
use crate::models::{NewProject, Project, ProjectInput, ProjectView, TaskCounts};
use crate::store::{ProjectStore, TaskStore};

/// Project use-cases, always scoped to the calling identity.
#[derive(Clone)]
pub struct ProjectService {
    guard: OwnershipGuard,
    projects: Arc<dyn ProjectStore>,
    tasks: Arc<dyn TaskStore>,
}

impl ProjectService {
    pub fn new(
        guard: OwnershipGuard,
        projects: Arc<dyn ProjectStore>,
        tasks: Arc<dyn TaskStore>,
    ) -> Self {
        Self {
            guard,
            projects,
            tasks,
        }
    }

    /// The caller's projects, newest first, with task progress.
    pub async fn list_projects(
        &self,
        identity: &AuthenticatedIdentity,
    ) -> Result<Vec<ProjectView>, AccessError> {
        let projects = self.projects.list_projects(identity.user_id).await?;
        let mut views = Vec::with_capacity(projects.len());
        for project in projects {
            views.push(self.view(project).await?);
        }
        Ok(views)
    }

    pub async fn create_project(
        &self,
        identity: &AuthenticatedIdentity,
        input: ProjectInput,
    ) -> Result<ProjectView, AccessError> {
        let project = self
            .projects
            .insert_project(NewProject::new(input, identity.user_id))
            .await?;
        info!("user {} created project {}", identity.user_id, project.id);
        Ok(ProjectView::new(project, TaskCounts::default()))
    }

    pub async fn get_project(
        &self,
        identity: &AuthenticatedIdentity,
        project_id: i64,
    ) -> Result<ProjectView, AccessError> {
        let project = self.guard.authorize_project(identity, project_id).await?;
        self.view(project).await
    }

    /// Replaces title and description.
    pub async fn update_project(
        &self,
        identity: &AuthenticatedIdentity,
        project_id: i64,
        input: ProjectInput,
    ) -> Result<ProjectView, AccessError> {
        let mut project = self.guard.authorize_project(identity, project_id).await?;
        project.title = input.title;
        project.description = input.description;

        let updated = self
            .projects
            .update_project(&project)
            .await?
            .ok_or(AccessError::NotFoundOrForbidden(Resource::Project))?;
        self.view(updated).await
    }

    /// Deletes the project together with its tasks.
    pub async fn delete_project(
        &self,
        identity: &AuthenticatedIdentity,
        project_id: i64,
    ) -> Result<(), AccessError> {
        self.guard.authorize_project(identity, project_id).await?;
        if !self.projects.delete_project(project_id).await? {
            return Err(AccessError::NotFoundOrForbidden(Resource::Project));
        }
        info!("user {} deleted project {}", identity.user_id, project_id);
        Ok(())
    }

    async fn view(&self, project: Project) -> Result<ProjectView, AccessError> {
        let counts = self.tasks.task_counts(project.id).await?;
        Ok(ProjectView::new(project, counts))
    }
}
