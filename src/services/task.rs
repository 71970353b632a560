use std::sync::Arc;

use crate::error::{AppError, ErrorKind};
use crate::models::{Task, TaskPatch, TodoList};
use crate::repository::{TaskRepository, TodoListRepository};

/// Business rules for tasks. Ownership is checked through the task's list.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    lists: Arc<dyn TodoListRepository>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>, lists: Arc<dyn TodoListRepository>) -> Self {
        Self { tasks, lists }
    }

    /// The list with its tasks. Fails with `NotFound` unless `list_id` is owned by
    /// `user_id`.
    async fn owned_list(&self, list_id: i32, user_id: i32) -> Result<TodoList, AppError> {
        self.lists
            .find_by_id(list_id, user_id)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => AppError::NotFound("Todo list not found".into()),
                _ => err,
            })
    }

    pub async fn get_all_tasks_for_list(
        &self,
        list_id: i32,
        user_id: i32,
    ) -> Result<Vec<Task>, AppError> {
        if list_id <= 0 {
            return Err(AppError::InvalidInput("Invalid list ID".into()));
        }
        Ok(self.owned_list(list_id, user_id).await?.tasks)
    }

    pub async fn get_task_by_id(&self, task_id: i32, user_id: i32) -> Result<Task, AppError> {
        if task_id <= 0 {
            return Err(AppError::InvalidInput("Invalid task ID".into()));
        }
        self.tasks
            .find_by_id(task_id, user_id)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => AppError::NotFound("Task not found".into()),
                _ => err,
            })
    }

    /// Like [`get_task_by_id`](Self::get_task_by_id), but a task that lives in a
    /// different list than `list_id` is reported as not found.
    pub async fn get_task_in_list(
        &self,
        list_id: i32,
        task_id: i32,
        user_id: i32,
    ) -> Result<Task, AppError> {
        if list_id <= 0 {
            return Err(AppError::InvalidInput("Invalid list ID".into()));
        }
        let task = self.get_task_by_id(task_id, user_id).await?;
        if task.list_id != list_id {
            return Err(AppError::NotFound("Task not found".into()));
        }
        Ok(task)
    }

    /// Adds a task to a list owned by `user_id`. New tasks start out not completed.
    pub async fn create_task(
        &self,
        list_id: i32,
        user_id: i32,
        title: &str,
        description: &str,
    ) -> Result<Task, AppError> {
        if list_id <= 0 {
            return Err(AppError::InvalidInput("Invalid list ID".into()));
        }
        if title.is_empty() {
            return Err(AppError::InvalidInput("Task title cannot be empty".into()));
        }
        if description.is_empty() {
            return Err(AppError::InvalidInput(
                "Task description cannot be empty".into(),
            ));
        }
        self.owned_list(list_id, user_id).await?;

        let task = self.tasks.create_task(list_id, title, description).await?;
        log::debug!("user {} created task {} in list {}", user_id, task.id, list_id);
        Ok(task)
    }

    /// Applies the provided fields of `patch`. Empty strings leave the stored title
    /// or description as they are.
    pub async fn update_task(
        &self,
        task_id: i32,
        user_id: i32,
        patch: TaskPatch,
    ) -> Result<Task, AppError> {
        let task = self.get_task_by_id(task_id, user_id).await?;
        self.apply_patch(task, patch).await
    }

    /// [`update_task`](Self::update_task) for a task addressed through `list_id`.
    pub async fn update_task_in_list(
        &self,
        list_id: i32,
        task_id: i32,
        user_id: i32,
        patch: TaskPatch,
    ) -> Result<Task, AppError> {
        let task = self.get_task_in_list(list_id, task_id, user_id).await?;
        self.apply_patch(task, patch).await
    }

    async fn apply_patch(&self, mut task: Task, patch: TaskPatch) -> Result<Task, AppError> {
        patch.apply_to(&mut task);
        self.tasks.update_task(&task).await?;
        Ok(task)
    }

    pub async fn delete_task(&self, task_id: i32, user_id: i32) -> Result<(), AppError> {
        let task = self.get_task_by_id(task_id, user_id).await?;
        self.remove(task, user_id).await
    }

    /// [`delete_task`](Self::delete_task) for a task addressed through `list_id`.
    pub async fn delete_task_in_list(
        &self,
        list_id: i32,
        task_id: i32,
        user_id: i32,
    ) -> Result<(), AppError> {
        let task = self.get_task_in_list(list_id, task_id, user_id).await?;
        self.remove(task, user_id).await
    }

    async fn remove(&self, task: Task, user_id: i32) -> Result<(), AppError> {
        self.tasks.delete_task(&task).await?;
        log::debug!("user {} deleted task {}", user_id, task.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::UserRepository;
    use crate::testing::MemoryStore;
    use pretty_assertions::assert_eq;

    struct Fixture {
        store: MemoryStore,
        tasks: TaskService,
        alice: i32,
        bob: i32,
        list: i32,
    }

    async fn setup() -> Fixture {
        let store = MemoryStore::new();
        let alice = store.create_user("alice", "hash").await.unwrap().id;
        let bob = store.create_user("bob", "hash").await.unwrap().id;
        let list = store.create_list("Alice's list", alice).await.unwrap().id;
        let tasks = TaskService::new(Arc::new(store.clone()), Arc::new(store.clone()));
        Fixture {
            store,
            tasks,
            alice,
            bob,
            list,
        }
    }

    #[actix_rt::test]
    async fn test_create_task_starts_incomplete() {
        let f = setup().await;
        let task = f
            .tasks
            .create_task(f.list, f.alice, "Buy milk", "2 liters")
            .await
            .unwrap();
        assert!(!task.completed);
        assert_eq!(
            f.tasks.get_all_tasks_for_list(f.list, f.alice).await.unwrap(),
            vec![task]
        );
    }

    #[actix_rt::test]
    async fn test_create_task_rejects_empty_fields_without_writing() {
        let f = setup().await;
        let writes = f.store.write_count();

        let no_title = f.tasks.create_task(f.list, f.alice, "", "desc").await;
        let no_description = f.tasks.create_task(f.list, f.alice, "title", "").await;
        let bad_list = f.tasks.create_task(0, f.alice, "title", "desc").await;
        for result in [no_title, no_description, bad_list] {
            assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidInput);
        }
        assert_eq!(f.store.write_count(), writes);
        assert!(f.store.tasks_in_list(f.list).is_empty());
    }

    #[actix_rt::test]
    async fn test_create_task_in_foreign_list_is_not_found() {
        let f = setup().await;
        let err = f
            .tasks
            .create_task(f.list, f.bob, "sneaky", "desc")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(f.store.tasks_in_list(f.list).is_empty());
    }

    #[actix_rt::test]
    async fn test_listing_tasks_checks_id_and_owner() {
        let f = setup().await;
        let reads = f.store.read_count();
        let err = f.tasks.get_all_tasks_for_list(-3, f.alice).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(f.store.read_count(), reads);

        let err = f.tasks.get_all_tasks_for_list(f.list, f.bob).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[actix_rt::test]
    async fn test_listing_tasks_reads_once() {
        let f = setup().await;
        for title in ["one", "two"] {
            f.tasks.create_task(f.list, f.alice, title, "d").await.unwrap();
        }

        let reads = f.store.read_count();
        let tasks = f.tasks.get_all_tasks_for_list(f.list, f.alice).await.unwrap();
        assert_eq!(f.store.read_count(), reads + 1);
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "two"]);
    }

    #[actix_rt::test]
    async fn test_update_task_completed_tri_state() {
        let f = setup().await;
        let task = f
            .tasks
            .create_task(f.list, f.alice, "Buy milk", "2 liters")
            .await
            .unwrap();

        let done = TaskPatch {
            completed: Some(true),
            ..Default::default()
        };
        assert!(f.tasks.update_task(task.id, f.alice, done).await.unwrap().completed);

        let rename = TaskPatch {
            title: Some("Buy oat milk".into()),
            ..Default::default()
        };
        let renamed = f.tasks.update_task(task.id, f.alice, rename).await.unwrap();
        assert!(renamed.completed, "unset completed must be left alone");
        assert_eq!(renamed.title, "Buy oat milk");
        assert_eq!(renamed.description, "2 liters");

        let undo = TaskPatch {
            completed: Some(false),
            ..Default::default()
        };
        f.tasks.update_task(task.id, f.alice, undo).await.unwrap();
        let stored = f.tasks.get_task_by_id(task.id, f.alice).await.unwrap();
        assert!(!stored.completed);
    }

    #[actix_rt::test]
    async fn test_update_task_ignores_empty_strings() {
        let f = setup().await;
        let task = f
            .tasks
            .create_task(f.list, f.alice, "Buy milk", "2 liters")
            .await
            .unwrap();
        let patch = TaskPatch {
            title: Some(String::new()),
            description: Some(String::new()),
            completed: Some(true),
        };
        let updated = f.tasks.update_task(task.id, f.alice, patch).await.unwrap();
        assert_eq!(updated.title, "Buy milk");
        assert_eq!(updated.description, "2 liters");
        assert!(updated.completed);

        let stored = f.tasks.get_task_by_id(task.id, f.alice).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[actix_rt::test]
    async fn test_list_scoped_update_and_delete_read_once() {
        let f = setup().await;
        let other = f.store.create_list("Second", f.alice).await.unwrap().id;
        let task = f
            .tasks
            .create_task(f.list, f.alice, "Buy milk", "2 liters")
            .await
            .unwrap();
        let done = TaskPatch {
            completed: Some(true),
            ..Default::default()
        };

        let err = f
            .tasks
            .update_task_in_list(other, task.id, f.alice, done.clone())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = f
            .tasks
            .delete_task_in_list(other, task.id, f.alice)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let reads = f.store.read_count();
        let updated = f
            .tasks
            .update_task_in_list(f.list, task.id, f.alice, done)
            .await
            .unwrap();
        assert!(updated.completed);
        assert_eq!(f.store.read_count(), reads + 1);

        f.tasks
            .delete_task_in_list(f.list, task.id, f.alice)
            .await
            .unwrap();
        assert_eq!(f.store.read_count(), reads + 2);
        assert!(f.store.tasks_in_list(f.list).is_empty());
    }

    #[actix_rt::test]
    async fn test_other_users_tasks_are_not_found() {
        let f = setup().await;
        let task = f
            .tasks
            .create_task(f.list, f.alice, "Buy milk", "2 liters")
            .await
            .unwrap();

        let get = f.tasks.get_task_by_id(task.id, f.bob).await.unwrap_err();
        let update = f
            .tasks
            .update_task(task.id, f.bob, TaskPatch::default())
            .await
            .unwrap_err();
        let delete = f.tasks.delete_task(task.id, f.bob).await.unwrap_err();
        for err in [get, update, delete] {
            assert_eq!(err.kind(), ErrorKind::NotFound);
        }
        assert_eq!(f.store.tasks_in_list(f.list).len(), 1);
    }

    #[actix_rt::test]
    async fn test_get_task_in_list_rejects_other_list() {
        let f = setup().await;
        let other = f.store.create_list("Second", f.alice).await.unwrap().id;
        let task = f
            .tasks
            .create_task(f.list, f.alice, "Buy milk", "2 liters")
            .await
            .unwrap();

        assert_eq!(
            f.tasks.get_task_in_list(f.list, task.id, f.alice).await.unwrap(),
            task
        );
        let err = f
            .tasks
            .get_task_in_list(other, task.id, f.alice)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[actix_rt::test]
    async fn test_delete_task() {
        let f = setup().await;
        let task = f
            .tasks
            .create_task(f.list, f.alice, "Buy milk", "2 liters")
            .await
            .unwrap();
        f.tasks.delete_task(task.id, f.alice).await.unwrap();
        assert_eq!(
            f.tasks.get_task_by_id(task.id, f.alice).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            f.tasks.delete_task(0, f.alice).await.unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }
}
