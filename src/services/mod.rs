pub mod auth;
pub mod task;
pub mod todo_list;

pub use auth::AuthService;
pub use task::TaskService;
pub use todo_list::TodoListService;
