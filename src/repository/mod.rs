//! Data access for users, todo lists and tasks.
//!
//! Each entity has a trait describing its queries and a PostgreSQL implementation
//! backed by a shared [`PgPool`]. Repositories enforce no business rules; the
//! owner filters they take are the storage-level half of the ownership checks
//! performed by the services.

pub mod task;
pub mod todo_list;
pub mod user;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub use task::{PgTaskRepository, TaskRepository};
pub use todo_list::{PgTodoListRepository, TodoListRepository};
pub use user::{PgUserRepository, UserRepository};

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Opens a connection pool and brings the schema up to date.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    MIGRATOR.run(&pool).await?;
    Ok(pool)
}
