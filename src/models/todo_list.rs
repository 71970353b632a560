use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::task::Task;

/// A todo list owned by a single user, together with its tasks.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq, Eq)]
pub struct TodoList {
    pub id: i32,
    pub title: String,
    /// Owner of the list. Not part of the API representation.
    #[serde(skip_serializing, default)]
    pub user_id: i32,
    /// Loaded separately from the `tasks` table.
    #[sqlx(skip)]
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Request body for creating or renaming a list.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct TodoListInput {
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
}
