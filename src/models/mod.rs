pub mod task;
pub mod todo_list;
pub mod user;

pub use task::{NewTaskInput, Task, TaskPatch};
pub use todo_list::{TodoList, TodoListInput};
pub use user::User;
