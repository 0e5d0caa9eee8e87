//! PostgreSQL implementation of the store traits.
//!
//! Queries are checked at runtime (`query_as` + `FromRow`) so the crate builds
//! without a live database. The schema lives in `migrations/` and is applied
//! by [`PgStore::migrate`] at startup.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{CredentialStore, ProjectStore, StoreResult, TaskStore};
use crate::models::{NewProject, NewTask, NewUser, Project, Task, TaskCounts, User};

const PROJECT_COLUMNS: &str = "id, title, description, created_at, owner_user_id";
const TASK_COLUMNS: &str = "id, title, description, completed, due_date, project_id";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies any pending migrations from `migrations/`.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> StoreResult<bool> {
        let (exists,) =
            sqlx::query_as::<_, (bool,)>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn save(&self, user: NewUser) -> StoreResult<User> {
        // The UNIQUE index on users.email turns a concurrent duplicate into
        // a unique violation here.
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2)
             RETURNING id, email, password_hash",
        )
        .bind(user.email)
        .bind(user.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn find_project(&self, id: i64) -> StoreResult<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects WHERE id = $1",
            PROJECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(project)
    }

    async fn list_projects(&self, owner_user_id: i64) -> StoreResult<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects WHERE owner_user_id = $1 ORDER BY created_at DESC, id DESC",
            PROJECT_COLUMNS
        ))
        .bind(owner_user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(projects)
    }

    async fn insert_project(&self, project: NewProject) -> StoreResult<Project> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "INSERT INTO projects (title, description, owner_user_id) VALUES ($1, $2, $3)
             RETURNING {}",
            PROJECT_COLUMNS
        ))
        .bind(project.title)
        .bind(project.description)
        .bind(project.owner_user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(project)
    }

    async fn update_project(&self, project: &Project) -> StoreResult<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "UPDATE projects SET title = $1, description = $2 WHERE id = $3 RETURNING {}",
            PROJECT_COLUMNS
        ))
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(project)
    }

    async fn delete_project(&self, id: i64) -> StoreResult<bool> {
        // tasks.project_id is ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn find_task(&self, id: i64) -> StoreResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn list_tasks(&self, project_id: i64) -> StoreResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE project_id = $1 ORDER BY id",
            TASK_COLUMNS
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn insert_task(&self, task: NewTask) -> StoreResult<Task> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (title, description, due_date, project_id) VALUES ($1, $2, $3, $4)
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(task.title)
        .bind(task.description)
        .bind(task.due_date)
        .bind(task.project_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> StoreResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET title = $1, description = $2, completed = $3, due_date = $4
             WHERE id = $5 RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.due_date)
        .bind(task.id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn delete_task(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn task_counts(&self, project_id: i64) -> StoreResult<TaskCounts> {
        let counts = sqlx::query_as::<_, TaskCounts>(
            "SELECT COUNT(*) AS total, COUNT(*) FILTER (WHERE completed) AS completed
             FROM tasks WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(counts)
    }
}
