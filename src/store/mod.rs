//!
//! # Persistence contracts
//!
//! The core never talks to a database directly. It depends on three small,
//! object-safe store traits and receives implementations as `Arc<dyn ...>`:
//!
//! - [`CredentialStore`]: user records, looked up by email.
//! - [`ProjectStore`]: projects, looked up by id or owner.
//! - [`TaskStore`]: tasks, looked up by id or parent project.
//!
//! Two implementations ship with the crate: [`postgres::PgStore`] for
//! production and [`memory::MemoryStore`] for tests and database-less runs.
//!
//! Stores only report what they see. Ownership checks belong to
//! [`crate::guard::OwnershipGuard`], never to a store.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewProject, NewTask, NewUser, Project, Task, TaskCounts, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors reported by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write. Carries the constraint name
    /// when the backend reports one.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    /// Any other backend failure (connection loss, bad SQL, migration error).
    #[error("store failure: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                StoreError::UniqueViolation(
                    db_error
                        .constraint()
                        .unwrap_or("unknown constraint")
                        .to_string(),
                )
            }
            _ => StoreError::Backend(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        StoreError::Backend(format!("migration failed: {}", error))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persists user accounts.
///
/// `save` must enforce email uniqueness itself and report a duplicate as
/// [`StoreError::UniqueViolation`]; callers treat that as the authoritative
/// check and `exists_by_email` as a shortcut only.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn exists_by_email(&self, email: &str) -> StoreResult<bool>;

    async fn save(&self, user: NewUser) -> StoreResult<User>;
}

/// Persists projects.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn find_project(&self, id: i64) -> StoreResult<Option<Project>>;

    /// All projects of one owner, newest first.
    async fn list_projects(&self, owner_user_id: i64) -> StoreResult<Vec<Project>>;

    async fn insert_project(&self, project: NewProject) -> StoreResult<Project>;

    /// Writes title and description. Returns `None` if the row is gone.
    async fn update_project(&self, project: &Project) -> StoreResult<Option<Project>>;

    /// Deletes the project and all of its tasks. Returns whether a row was removed.
    async fn delete_project(&self, id: i64) -> StoreResult<bool>;
}

/// Persists tasks.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn find_task(&self, id: i64) -> StoreResult<Option<Task>>;

    /// All tasks of one project, in creation order.
    async fn list_tasks(&self, project_id: i64) -> StoreResult<Vec<Task>>;

    async fn insert_task(&self, task: NewTask) -> StoreResult<Task>;

    /// Writes every editable column. Returns `None` if the row is gone.
    async fn update_task(&self, task: &Task) -> StoreResult<Option<Task>>;

    async fn delete_task(&self, id: i64) -> StoreResult<bool>;

    async fn task_counts(&self, project_id: i64) -> StoreResult<TaskCounts>;
}
