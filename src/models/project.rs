use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Input structure for creating or updating a project.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ProjectInput {
    /// The title of the project.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description for the project.
    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// A project as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    /// The user who created the project. Never changes after creation.
    pub owner_user_id: i64,
}

/// A project that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub owner_user_id: i64,
}

impl NewProject {
    pub fn new(input: ProjectInput, owner_user_id: i64) -> Self {
        Self {
            title: input.title,
            description: input.description,
            owner_user_id,
        }
    }
}

/// Number of tasks in a project, total and completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct TaskCounts {
    pub total: i64,
    pub completed: i64,
}

/// Project representation returned by the API, including task progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub owner_user_id: i64,
    pub task_count: i64,
    pub completed_task_count: i64,
}

impl ProjectView {
    pub fn new(project: Project, counts: TaskCounts) -> Self {
        Self {
            id: project.id,
            title: project.title,
            description: project.description,
            created_at: project.created_at,
            owner_user_id: project.owner_user_id,
            task_count: counts.total,
            completed_task_count: counts.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_input_validation() {
        let valid_input = ProjectInput {
            title: "Website relaunch".to_string(),
            description: Some("Q3 marketing site".to_string()),
        };
        assert!(valid_input.validate().is_ok());

        let empty_title = ProjectInput {
            title: "".to_string(),
            description: None,
        };
        assert!(empty_title.validate().is_err());

        let long_description = ProjectInput {
            title: "Valid".to_string(),
            description: Some("d".repeat(1001)),
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_project_view_carries_counts() {
        let project = Project {
            id: 3,
            title: "P1".to_string(),
            description: None,
            created_at: Utc::now(),
            owner_user_id: 9,
        };

        let view = ProjectView::new(
            project,
            TaskCounts {
                total: 4,
                completed: 1,
            },
        );
        assert_eq!(view.owner_user_id, 9);
        assert_eq!(view.task_count, 4);
        assert_eq!(view.completed_task_count, 1);
    }
}
