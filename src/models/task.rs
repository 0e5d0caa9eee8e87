use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Input structure for creating a task.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description for the task.
    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Optional due date for the task.
    pub due_date: Option<NaiveDate>,
}

/// Input structure for updating a task.
///
/// `title`, `description` and `due_date` replace the stored values on every
/// update. `completed` is only applied when present in the payload, so a
/// missing field and an explicit `false` are different requests.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub due_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    /// The project this task belongs to. Never changes after creation.
    pub project_id: i64,
}

impl Task {
    /// Applies an update request using the editable-field policy: text fields
    /// and the due date are overwritten, `completed` only when supplied.
    pub fn apply(&mut self, update: TaskUpdate) {
        self.title = update.title;
        self.description = update.description;
        self.due_date = update.due_date;
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
    }
}

/// A task that has not been persisted yet. New tasks always start incomplete.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub project_id: i64,
}

impl NewTask {
    pub fn new(input: TaskInput, project_id: i64) -> Self {
        Self {
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            project_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task(completed: bool) -> Task {
        Task {
            id: 1,
            title: "Write docs".to_string(),
            description: Some("API reference".to_string()),
            completed,
            due_date: None,
            project_id: 10,
        }
    }

    #[test]
    fn test_task_input_validation() {
        let valid_input = TaskInput {
            title: "Valid Task".to_string(),
            description: Some("Valid Description".to_string()),
            due_date: NaiveDate::from_ymd_opt(2026, 1, 31),
        };
        assert!(valid_input.validate().is_ok());

        let empty_title = TaskInput {
            title: "".to_string(),
            description: None,
            due_date: None,
        };
        assert!(empty_title.validate().is_err());

        let long_title = TaskInput {
            title: "a".repeat(201),
            description: None,
            due_date: None,
        };
        assert!(long_title.validate().is_err());

        let long_description = TaskInput {
            title: "Valid title".to_string(),
            description: Some("b".repeat(1001)),
            due_date: None,
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_update_without_completed_keeps_prior_value() {
        let mut task = sample_task(true);
        task.apply(TaskUpdate {
            title: "Renamed".to_string(),
            description: None,
            due_date: None,
            completed: None,
        });

        assert_eq!(task.title, "Renamed");
        assert_eq!(task.description, None);
        assert!(task.completed);
    }

    #[test]
    fn test_update_with_explicit_false_clears_completed() {
        let mut task = sample_task(true);
        task.apply(TaskUpdate {
            title: "Write docs".to_string(),
            description: None,
            due_date: None,
            completed: Some(false),
        });
        assert!(!task.completed);
    }

    #[test]
    fn test_missing_completed_deserializes_as_none() {
        let update: TaskUpdate = serde_json::from_str(r#"{"title": "T"}"#).unwrap();
        assert_eq!(update.completed, None);

        let update: TaskUpdate =
            serde_json::from_str(r#"{"title": "T", "completed": false}"#).unwrap();
        assert_eq!(update.completed, Some(false));
    }
}
