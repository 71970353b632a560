use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::Task;

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Tasks of `list_id`, restricted to lists owned by `user_id`.
    async fn find_all_for_list(&self, list_id: i32, user_id: i32) -> Result<Vec<Task>, AppError>;

    /// The task with `task_id` if its list is owned by `user_id`; `NotFound` otherwise.
    async fn find_by_id(&self, task_id: i32, user_id: i32) -> Result<Task, AppError>;

    async fn create_task(
        &self,
        list_id: i32,
        title: &str,
        description: &str,
    ) -> Result<Task, AppError>;

    /// Full overwrite of the mutable columns of `task`.
    async fn update_task(&self, task: &Task) -> Result<(), AppError>;

    async fn delete_task(&self, task: &Task) -> Result<(), AppError>;
}

pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_all_for_list(&self, list_id: i32, user_id: i32) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT tasks.id, tasks.title, tasks.description, tasks.completed, tasks.list_id
             FROM tasks JOIN todo_lists ON todo_lists.id = tasks.list_id
             WHERE todo_lists.user_id = $1 AND tasks.list_id = $2
             ORDER BY tasks.id",
        )
        .bind(user_id)
        .bind(list_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn find_by_id(&self, task_id: i32, user_id: i32) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT tasks.id, tasks.title, tasks.description, tasks.completed, tasks.list_id
             FROM tasks JOIN todo_lists ON todo_lists.id = tasks.list_id
             WHERE todo_lists.user_id = $1 AND tasks.id = $2",
        )
        .bind(user_id)
        .bind(task_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    async fn create_task(
        &self,
        list_id: i32,
        title: &str,
        description: &str,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (title, description, completed, list_id)
             VALUES ($1, $2, FALSE, $3)
             RETURNING id, title, description, completed, list_id",
        )
        .bind(title)
        .bind(description)
        .bind(list_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE tasks SET title = $1, description = $2, completed = $3
             WHERE id = $4 AND list_id = $5",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.id)
        .bind(task.list_id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Task not found".into()));
        }
        Ok(())
    }

    async fn delete_task(&self, task: &Task) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Task not found".into()));
        }
        Ok(())
    }
}
