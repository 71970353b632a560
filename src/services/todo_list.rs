use std::sync::Arc;

use crate::error::{AppError, ErrorKind};
use crate::models::TodoList;
use crate::repository::TodoListRepository;

/// Business rules for todo lists. Every operation is scoped to the caller's user id.
#[derive(Clone)]
pub struct TodoListService {
    lists: Arc<dyn TodoListRepository>,
}

impl TodoListService {
    pub fn new(lists: Arc<dyn TodoListRepository>) -> Self {
        Self { lists }
    }

    pub async fn get_all_lists(&self, user_id: i32) -> Result<Vec<TodoList>, AppError> {
        self.lists.find_all_by_owner(user_id).await
    }

    /// Fetches a list owned by `user_id`. Lists owned by other users are reported
    /// exactly like missing ones.
    pub async fn get_list_by_id(&self, list_id: i32, user_id: i32) -> Result<TodoList, AppError> {
        if list_id <= 0 {
            return Err(AppError::InvalidInput("Invalid list ID".into()));
        }
        self.lists
            .find_by_id(list_id, user_id)
            .await
            .map_err(list_not_found)
    }

    pub async fn create_list(&self, title: &str, user_id: i32) -> Result<TodoList, AppError> {
        if user_id <= 0 {
            return Err(AppError::InvalidInput("Invalid user ID".into()));
        }
        let list = self.lists.create_list(title, user_id).await?;
        log::debug!("user {} created todo list {}", user_id, list.id);
        Ok(list)
    }

    pub async fn update_list(
        &self,
        list_id: i32,
        user_id: i32,
        title: &str,
    ) -> Result<TodoList, AppError> {
        let mut list = self.get_list_by_id(list_id, user_id).await?;
        list.title = title.to_string();
        self.lists.update_list(&list).await.map_err(list_not_found)?;
        Ok(list)
    }

    /// Removes the list and all of its tasks in a single transaction.
    pub async fn delete_list(&self, list_id: i32, user_id: i32) -> Result<(), AppError> {
        let list = self.get_list_by_id(list_id, user_id).await?;
        self.lists.delete_list(&list).await.map_err(list_not_found)?;
        log::info!(
            "user {} deleted todo list {} ({} task(s))",
            user_id,
            list.id,
            list.tasks.len()
        );
        Ok(())
    }
}

fn list_not_found(err: AppError) -> AppError {
    match err.kind() {
        ErrorKind::NotFound => AppError::NotFound("Todo list not found".into()),
        _ => err,
    }
}
