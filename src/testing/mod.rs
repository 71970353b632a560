//! In-memory implementations of the repository traits.
//!
//! `MemoryStore` keeps users, lists and tasks behind one mutex and applies the same
//! ownership filters as the PostgreSQL queries, so services and handlers can be
//! exercised without a database.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::AppError;
use crate::models::{Task, TodoList, User};
use crate::repository::{TaskRepository, TodoListRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    lists: BTreeMap<i32, TodoList>,
    tasks: BTreeMap<i32, Task>,
    next_id: i32,
    reads: usize,
    writes: usize,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn owned_list(&self, list_id: i32, user_id: i32) -> Option<&TodoList> {
        self.lists
            .get(&list_id)
            .filter(|list| list.user_id == user_id)
    }

    fn tasks_of(&self, list_id: i32) -> Vec<Task> {
        self.tasks
            .values()
            .filter(|task| task.list_id == list_id)
            .cloned()
            .collect()
    }

    fn with_tasks(&self, list: &TodoList) -> TodoList {
        TodoList {
            tasks: self.tasks_of(list.id),
            ..list.clone()
        }
    }
}

/// A cloneable handle to a shared set of in-memory tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        self.tables
            .lock()
            .map_err(|_| AppError::InternalServerError("memory store poisoned".into()))
    }

    fn read(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        let mut tables = self.lock()?;
        tables.reads += 1;
        Ok(tables)
    }

    fn write(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        let mut tables = self.lock()?;
        tables.writes += 1;
        Ok(tables)
    }

    /// Number of repository calls that read from the store.
    pub fn read_count(&self) -> usize {
        self.tables.lock().map(|t| t.reads).unwrap_or_default()
    }

    /// Number of repository calls that wrote to the store.
    pub fn write_count(&self) -> usize {
        self.tables.lock().map(|t| t.writes).unwrap_or_default()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().map(|t| t.users.len()).unwrap_or_default()
    }

    /// Every stored task belonging to `list_id`, regardless of owner.
    pub fn tasks_in_list(&self, list_id: i32) -> Vec<Task> {
        self.tables
            .lock()
            .map(|t| t.tasks_of(list_id))
            .unwrap_or_default()
    }

    pub fn list_exists(&self, list_id: i32) -> bool {
        self.tables
            .lock()
            .map(|t| t.lists.contains_key(&list_id))
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let mut tables = self.write()?;
        if tables.users.values().any(|user| user.username == username) {
            return Err(AppError::UserAlreadyExists);
        }
        let user = User {
            id: tables.next_id(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl TodoListRepository for MemoryStore {
    async fn find_all_by_owner(&self, user_id: i32) -> Result<Vec<TodoList>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .lists
            .values()
            .filter(|list| list.user_id == user_id)
            .map(|list| tables.with_tasks(list))
            .collect())
    }

    async fn find_by_id(&self, list_id: i32, user_id: i32) -> Result<TodoList, AppError> {
        let tables = self.read()?;
        tables
            .owned_list(list_id, user_id)
            .map(|list| tables.with_tasks(list))
            .ok_or_else(|| AppError::NotFound("Record not found".into()))
    }

    async fn create_list(&self, title: &str, user_id: i32) -> Result<TodoList, AppError> {
        let mut tables = self.write()?;
        if !tables.users.contains_key(&user_id) {
            return Err(AppError::DatabaseError(
                "insert violates foreign key todo_lists.user_id".into(),
            ));
        }
        let list = TodoList {
            id: tables.next_id(),
            title: title.to_string(),
            user_id,
            tasks: Vec::new(),
        };
        tables.lists.insert(list.id, list.clone());
        Ok(list)
    }

    async fn update_list(&self, list: &TodoList) -> Result<(), AppError> {
        let mut tables = self.write()?;
        match tables.lists.get_mut(&list.id) {
            Some(stored) if stored.user_id == list.user_id => {
                stored.title = list.title.clone();
                Ok(())
            }
            _ => Err(AppError::NotFound("Todo list not found".into())),
        }
    }

    async fn delete_list(&self, list: &TodoList) -> Result<(), AppError> {
        let mut tables = self.write()?;
        if tables.owned_list(list.id, list.user_id).is_none() {
            return Err(AppError::NotFound("Todo list not found".into()));
        }
        tables.tasks.retain(|_, task| task.list_id != list.id);
        tables.lists.remove(&list.id);
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn find_all_for_list(&self, list_id: i32, user_id: i32) -> Result<Vec<Task>, AppError> {
        let tables = self.read()?;
        match tables.owned_list(list_id, user_id) {
            Some(_) => Ok(tables.tasks_of(list_id)),
            None => Ok(Vec::new()),
        }
    }

    async fn find_by_id(&self, task_id: i32, user_id: i32) -> Result<Task, AppError> {
        let tables = self.read()?;
        tables
            .tasks
            .get(&task_id)
            .filter(|task| tables.owned_list(task.list_id, user_id).is_some())
            .cloned()
            .ok_or_else(|| AppError::NotFound("Record not found".into()))
    }

    async fn create_task(
        &self,
        list_id: i32,
        title: &str,
        description: &str,
    ) -> Result<Task, AppError> {
        let mut tables = self.write()?;
        if !tables.lists.contains_key(&list_id) {
            return Err(AppError::DatabaseError(
                "insert violates foreign key tasks.list_id".into(),
            ));
        }
        let task = Task {
            id: tables.next_id(),
            title: title.to_string(),
            description: description.to_string(),
            completed: false,
            list_id,
        };
        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> Result<(), AppError> {
        let mut tables = self.write()?;
        match tables.tasks.get_mut(&task.id) {
            Some(stored) if stored.list_id == task.list_id => {
                *stored = task.clone();
                Ok(())
            }
            _ => Err(AppError::NotFound("Task not found".into())),
        }
    }

    async fn delete_task(&self, task: &Task) -> Result<(), AppError> {
        let mut tables = self.write()?;
        tables
            .tasks
            .remove(&task.id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }
}
