//!
//! # Ownership enforcement
//!
//! Every project and task access goes through [`OwnershipGuard`] before the
//! services touch the store. The guard fetches the resource and compares its
//! owner with the caller's [`AuthenticatedIdentity`].
//!
//! A missing resource and a resource owned by someone else produce the same
//! [`AccessError::NotFoundOrForbidden`], so ids cannot be used to probe for
//! other tenants' data. Results are never cached: each call reads the store.

use std::fmt;
use std::sync::Arc;

use log::debug;
use thiserror::Error;

use crate::auth::AuthenticatedIdentity;
use crate::models::{Project, Task};
use crate::store::{ProjectStore, StoreError, TaskStore};

/// Kind of resource an access check was about. Only used for messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Project,
    Task,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Resource::Project => write!(f, "project"),
            Resource::Task => write!(f, "task"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AccessError {
    /// The resource does not exist, or it exists but is not the caller's.
    #[error("{0} not found or access denied")]
    NotFoundOrForbidden(Resource),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct OwnershipGuard {
    projects: Arc<dyn ProjectStore>,
    tasks: Arc<dyn TaskStore>,
}

impl OwnershipGuard {
    pub fn new(projects: Arc<dyn ProjectStore>, tasks: Arc<dyn TaskStore>) -> Self {
        Self { projects, tasks }
    }

    /// Returns the project if it exists and is owned by `identity`.
    pub async fn authorize_project(
        &self,
        identity: &AuthenticatedIdentity,
        project_id: i64,
    ) -> Result<Project, AccessError> {
        match self.projects.find_project(project_id).await? {
            Some(project) if project.owner_user_id == identity.user_id => Ok(project),
            _ => {
                debug!(
                    "project access denied: user={} project={}",
                    identity.user_id, project_id
                );
                Err(AccessError::NotFoundOrForbidden(Resource::Project))
            }
        }
    }

    /// Returns the task if its project is owned by `identity` and the task
    /// really belongs to `project_id`.
    ///
    /// A task addressed through another project's path is refused even when
    /// both projects belong to the caller.
    pub async fn authorize_task(
        &self,
        identity: &AuthenticatedIdentity,
        project_id: i64,
        task_id: i64,
    ) -> Result<Task, AccessError> {
        self.authorize_project(identity, project_id).await?;

        match self.tasks.find_task(task_id).await? {
            Some(task) if task.project_id == project_id => Ok(task),
            _ => {
                debug!(
                    "task access denied: user={} project={} task={}",
                    identity.user_id, project_id, task_id
                );
                Err(AccessError::NotFoundOrForbidden(Resource::Task))
            }
        }
    }
}
