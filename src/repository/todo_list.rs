use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::error::AppError;
use crate::models::{Task, TodoList};

#[async_trait]
pub trait TodoListRepository: Send + Sync {
    /// All lists owned by `user_id`, each with its tasks.
    async fn find_all_by_owner(&self, user_id: i32) -> Result<Vec<TodoList>, AppError>;

    /// The list with `list_id` if it is owned by `user_id`, with its tasks.
    /// Fails with `NotFound` otherwise.
    async fn find_by_id(&self, list_id: i32, user_id: i32) -> Result<TodoList, AppError>;

    async fn create_list(&self, title: &str, user_id: i32) -> Result<TodoList, AppError>;

    /// Overwrites the stored row with `list` (tasks are not touched).
    async fn update_list(&self, list: &TodoList) -> Result<(), AppError>;

    /// Deletes every task of `list` and then the list, atomically.
    async fn delete_list(&self, list: &TodoList) -> Result<(), AppError>;
}

pub struct PgTodoListRepository {
    pool: PgPool,
}

impl PgTodoListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn tasks_for(&self, list_ids: &[i32]) -> Result<HashMap<i32, Vec<Task>>, AppError> {
        if list_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, completed, list_id FROM tasks
             WHERE list_id = ANY($1) ORDER BY id",
        )
        .bind(list_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_list: HashMap<i32, Vec<Task>> = HashMap::new();
        for task in tasks {
            by_list.entry(task.list_id).or_default().push(task);
        }
        Ok(by_list)
    }
}

#[async_trait]
impl TodoListRepository for PgTodoListRepository {
    async fn find_all_by_owner(&self, user_id: i32) -> Result<Vec<TodoList>, AppError> {
        let mut lists = sqlx::query_as::<_, TodoList>(
            "SELECT id, title, user_id FROM todo_lists WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i32> = lists.iter().map(|list| list.id).collect();
        let mut tasks = self.tasks_for(&ids).await?;
        for list in &mut lists {
            list.tasks = tasks.remove(&list.id).unwrap_or_default();
        }
        Ok(lists)
    }

    async fn find_by_id(&self, list_id: i32, user_id: i32) -> Result<TodoList, AppError> {
        let mut list = sqlx::query_as::<_, TodoList>(
            "SELECT id, title, user_id FROM todo_lists WHERE id = $1 AND user_id = $2",
        )
        .bind(list_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        list.tasks = self
            .tasks_for(&[list.id])
            .await?
            .remove(&list.id)
            .unwrap_or_default();
        Ok(list)
    }

    async fn create_list(&self, title: &str, user_id: i32) -> Result<TodoList, AppError> {
        let list = sqlx::query_as::<_, TodoList>(
            "INSERT INTO todo_lists (title, user_id) VALUES ($1, $2)
             RETURNING id, title, user_id",
        )
        .bind(title)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(list)
    }

    async fn update_list(&self, list: &TodoList) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE todo_lists SET title = $1 WHERE id = $2 AND user_id = $3")
            .bind(&list.title)
            .bind(list.id)
            .bind(list.user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Todo list not found".into()));
        }
        Ok(())
    }

    async fn delete_list(&self, list: &TodoList) -> Result<(), AppError> {
        // rolled back on drop if any statement fails
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM tasks WHERE list_id = $1")
            .bind(list.id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM todo_lists WHERE id = $1 AND user_id = $2")
            .bind(list.id)
            .bind(list.user_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Todo list not found".into()));
        }

        tx.commit().await?;
        log::debug!(
            "deleted todo list {} with {} task(s)",
            list.id,
            removed.rows_affected()
        );
        Ok(())
    }
}
