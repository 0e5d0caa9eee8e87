use std::sync::Arc;

use actix_web::web;

use crate::auth::{AuthError, IdentityResolver, PasswordHasher, TokenCodec};
use crate::config::Config;
use crate::guard::OwnershipGuard;
use crate::services::{ProjectService, TaskService};
use crate::store::{CredentialStore, ProjectStore, TaskStore};

/// Shared application components, wired once at startup and cloned into
/// every worker.
#[derive(Clone)]
pub struct AppState {
    pub identity: web::Data<IdentityResolver>,
    pub projects: web::Data<ProjectService>,
    pub tasks: web::Data<TaskService>,
}

impl AppState {
    /// Builds all components on top of one store that serves users,
    /// projects and tasks.
    pub fn new<S>(store: Arc<S>, config: &Config) -> Result<Self, AuthError>
    where
        S: CredentialStore + ProjectStore + TaskStore + 'static,
    {
        let credentials: Arc<dyn CredentialStore> = store.clone();
        let projects: Arc<dyn ProjectStore> = store.clone();
        let tasks: Arc<dyn TaskStore> = store;

        let identity = IdentityResolver::new(
            credentials,
            TokenCodec::new(config.jwt_secret.as_bytes(), config.jwt_expiration),
            PasswordHasher::new(config.bcrypt_cost),
        )?;
        let guard = OwnershipGuard::new(projects.clone(), tasks.clone());

        Ok(Self {
            identity: web::Data::new(identity),
            projects: web::Data::new(ProjectService::new(
                guard.clone(),
                projects,
                tasks.clone(),
            )),
            tasks: web::Data::new(TaskService::new(guard, tasks)),
        })
    }
}
