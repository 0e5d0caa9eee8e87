//! In-process store backed by ordered maps behind an async mutex.
//!
//! Mirrors the PostgreSQL schema closely enough for tests: ids are assigned
//! sequentially from 1, emails are unique, and deleting a project cascades to
//! its tasks.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{CredentialStore, ProjectStore, StoreError, StoreResult, TaskStore};
use crate::models::{NewProject, NewTask, NewUser, Project, Task, TaskCounts, User};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    projects: BTreeMap<i64, Project>,
    tasks: BTreeMap<i64, Task>,
    last_user_id: i64,
    last_project_id: i64,
    last_task_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> StoreResult<bool> {
        let tables = self.tables.lock().await;
        Ok(tables.users.values().any(|u| u.email == email))
    }

    async fn save(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.lock().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::UniqueViolation("users_email_key".into()));
        }

        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            email: user.email,
            password_hash: user.password_hash,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn find_project(&self, id: i64) -> StoreResult<Option<Project>> {
        let tables = self.tables.lock().await;
        Ok(tables.projects.get(&id).cloned())
    }

    async fn list_projects(&self, owner_user_id: i64) -> StoreResult<Vec<Project>> {
        let tables = self.tables.lock().await;
        let mut projects: Vec<Project> = tables
            .projects
            .values()
            .filter(|p| p.owner_user_id == owner_user_id)
            .cloned()
            .collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(projects)
    }

    async fn insert_project(&self, project: NewProject) -> StoreResult<Project> {
        let mut tables = self.tables.lock().await;
        if !tables.users.contains_key(&project.owner_user_id) {
            return Err(StoreError::Backend(format!(
                "foreign key violation: user {} does not exist",
                project.owner_user_id
            )));
        }

        tables.last_project_id += 1;
        let project = Project {
            id: tables.last_project_id,
            title: project.title,
            description: project.description,
            created_at: Utc::now(),
            owner_user_id: project.owner_user_id,
        };
        tables.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn update_project(&self, project: &Project) -> StoreResult<Option<Project>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.projects.get_mut(&project.id).map(|stored| {
            stored.title = project.title.clone();
            stored.description = project.description.clone();
            stored.clone()
        }))
    }

    async fn delete_project(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.lock().await;
        let removed = tables.projects.remove(&id).is_some();
        if removed {
            tables.tasks.retain(|_, task| task.project_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn find_task(&self, id: i64) -> StoreResult<Option<Task>> {
        let tables = self.tables.lock().await;
        Ok(tables.tasks.get(&id).cloned())
    }

    async fn list_tasks(&self, project_id: i64) -> StoreResult<Vec<Task>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn insert_task(&self, task: NewTask) -> StoreResult<Task> {
        let mut tables = self.tables.lock().await;
        if !tables.projects.contains_key(&task.project_id) {
            return Err(StoreError::Backend(format!(
                "foreign key violation: project {} does not exist",
                task.project_id
            )));
        }

        tables.last_task_id += 1;
        let task = Task {
            id: tables.last_task_id,
            title: task.title,
            description: task.description,
            completed: false,
            due_date: task.due_date,
            project_id: task.project_id,
        };
        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> StoreResult<Option<Task>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.tasks.get_mut(&task.id).map(|stored| {
            stored.title = task.title.clone();
            stored.description = task.description.clone();
            stored.completed = task.completed;
            stored.due_date = task.due_date;
            stored.clone()
        }))
    }

    async fn delete_task(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.lock().await;
        Ok(tables.tasks.remove(&id).is_some())
    }

    async fn task_counts(&self, project_id: i64) -> StoreResult<TaskCounts> {
        let tables = self.tables.lock().await;
        let (total, completed) = tables
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .fold((0, 0), |(total, completed), t| {
                (total + 1, completed + i64::from(t.completed))
            });
        Ok(TaskCounts { total, completed })
    }
}
