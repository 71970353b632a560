use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::AuthConfig;
use crate::repository::{
    PgTaskRepository, PgTodoListRepository, PgUserRepository, TaskRepository,
    TodoListRepository, UserRepository,
};
use crate::services::{AuthService, TaskService, TodoListService};
use crate::testing::MemoryStore;

/// Everything a handler needs, shared across workers through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub lists: TodoListService,
    pub tasks: TaskService,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        lists: Arc<dyn TodoListRepository>,
        tasks: Arc<dyn TaskRepository>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            auth: AuthService::new(users, auth),
            lists: TodoListService::new(lists.clone()),
            tasks: TaskService::new(tasks, lists),
        }
    }

    pub fn postgres(pool: PgPool, auth: AuthConfig) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgTodoListRepository::new(pool.clone())),
            Arc::new(PgTaskRepository::new(pool)),
            auth,
        )
    }

    pub fn in_memory(store: MemoryStore, auth: AuthConfig) -> Self {
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
            auth,
        )
    }

    pub fn auth_config(&self) -> &AuthConfig {
        self.auth.config()
    }
}
