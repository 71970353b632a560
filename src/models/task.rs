use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A task inside a todo list. Ownership is inherited from the list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq, Eq)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// The owning list. Not part of the API representation.
    #[serde(skip_serializing, default)]
    pub list_id: i32,
}

/// Request body for creating a task.
///
/// Both fields default to empty so a missing field reaches the service, which
/// rejects it as invalid input.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewTaskInput {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
}

/// Partial update of a task. `None` leaves the stored value untouched, and so does
/// an empty title or description.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate, ToSchema, PartialEq, Eq)]
pub struct TaskPatch {
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Applies every provided, non-empty field to `task`.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title.filter(|title| !title.is_empty()) {
            task.title = title;
        }
        if let Some(description) = self.description.filter(|d| !d.is_empty()) {
            task.description = description;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}
