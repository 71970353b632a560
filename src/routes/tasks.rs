use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use validator::Validate;

use crate::auth::AuthenticatedUserId;
use crate::error::AppError;
use crate::models::{NewTaskInput, Task, TaskPatch};
use crate::routes::response::{self, Envelope};
use crate::state::AppState;

/// Tasks of one of the caller's lists.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks, possibly empty.
/// - `400 Bad Request`: non-numeric or non-positive list id.
/// - `401 Unauthorized`: missing, invalid or expired token.
/// - `404 Not Found`: the list does not exist or belongs to someone else.
#[utoipa::path(
    get,
    path = "/todolists/{list_id}/tasks",
    tag = "tasks",
    params(("list_id" = i32, Path, description = "Todo list id")),
    responses(
        (status = 200, description = "Tasks of the list", body = [Task]),
        (status = 400, description = "Invalid list id", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = Envelope),
        (status = 404, description = "List not found", body = Envelope)
    ),
    security(("bearer_auth" = []))
)]
#[get("/{list_id}/tasks")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    user: AuthenticatedUserId,
    path: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let tasks = state
        .tasks
        .get_all_tasks_for_list(path.into_inner(), user.0)
        .await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Adds a task to one of the caller's lists. Title and description are required.
///
/// ## Responses:
/// - `201 Created`: `ok` envelope.
/// - `400 Bad Request`: malformed body, empty or oversized title or description.
/// - `401 Unauthorized`: missing, invalid or expired token.
/// - `404 Not Found`: the list does not exist or belongs to someone else.
#[utoipa::path(
    post,
    path = "/todolists/{list_id}/tasks",
    tag = "tasks",
    params(("list_id" = i32, Path, description = "Todo list id")),
    request_body = NewTaskInput,
    responses(
        (status = 201, description = "Task created", body = Envelope),
        (status = 400, description = "Invalid input", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = Envelope),
        (status = 404, description = "List not found", body = Envelope)
    ),
    security(("bearer_auth" = []))
)]
#[post("/{list_id}/tasks")]
pub async fn create_task(
    state: web::Data<AppState>,
    user: AuthenticatedUserId,
    path: web::Path<i32>,
    body: web::Json<NewTaskInput>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    state
        .tasks
        .create_task(path.into_inner(), user.0, &body.title, &body.description)
        .await?;
    Ok(response::created("Task was successfully created"))
}

/// A single task of one of the caller's lists.
///
/// ## Responses:
/// - `200 OK`: the task.
/// - `400 Bad Request`: non-numeric or non-positive id.
/// - `401 Unauthorized`: missing, invalid or expired token.
/// - `404 Not Found`: no such task in that list, or the list is not the caller's.
#[utoipa::path(
    get,
    path = "/todolists/{list_id}/tasks/{id}",
    tag = "tasks",
    params(
        ("list_id" = i32, Path, description = "Todo list id"),
        ("id" = i32, Path, description = "Task id")
    ),
    responses(
        (status = 200, description = "The task", body = Task),
        (status = 400, description = "Invalid id", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = Envelope),
        (status = 404, description = "Task not found", body = Envelope)
    ),
    security(("bearer_auth" = []))
)]
#[get("/{list_id}/tasks/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    user: AuthenticatedUserId,
    path: web::Path<(i32, i32)>,
) -> Result<impl Responder, AppError> {
    let (list_id, task_id) = path.into_inner();
    let task = state.tasks.get_task_in_list(list_id, task_id, user.0).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task. Absent fields and empty strings are left as they are.
///
/// ## Responses:
/// - `200 OK`: `ok` envelope.
/// - `400 Bad Request`: malformed body, oversized field or invalid id.
/// - `401 Unauthorized`: missing, invalid or expired token.
/// - `404 Not Found`: no such task in that list, or the list is not the caller's.
#[utoipa::path(
    patch,
    path = "/todolists/{list_id}/tasks/{id}",
    tag = "tasks",
    params(
        ("list_id" = i32, Path, description = "Todo list id"),
        ("id" = i32, Path, description = "Task id")
    ),
    request_body = TaskPatch,
    responses(
        (status = 200, description = "Task updated", body = Envelope),
        (status = 400, description = "Invalid input", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = Envelope),
        (status = 404, description = "Task not found", body = Envelope)
    ),
    security(("bearer_auth" = []))
)]
#[patch("/{list_id}/tasks/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    user: AuthenticatedUserId,
    path: web::Path<(i32, i32)>,
    body: web::Json<TaskPatch>,
) -> Result<impl Responder, AppError> {
    let (list_id, task_id) = path.into_inner();
    body.validate()?;
    state
        .tasks
        .update_task_in_list(list_id, task_id, user.0, body.into_inner())
        .await?;
    Ok(response::ok("Task updated successfully"))
}

/// Deletes a task from one of the caller's lists.
///
/// ## Responses:
/// - `200 OK`: `ok` envelope.
/// - `400 Bad Request`: non-numeric or non-positive id.
/// - `401 Unauthorized`: missing, invalid or expired token.
/// - `404 Not Found`: no such task in that list, or the list is not the caller's.
#[utoipa::path(
    delete,
    path = "/todolists/{list_id}/tasks/{id}",
    tag = "tasks",
    params(
        ("list_id" = i32, Path, description = "Todo list id"),
        ("id" = i32, Path, description = "Task id")
    ),
    responses(
        (status = 200, description = "Task deleted", body = Envelope),
        (status = 400, description = "Invalid id", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = Envelope),
        (status = 404, description = "Task not found", body = Envelope)
    ),
    security(("bearer_auth" = []))
)]
#[delete("/{list_id}/tasks/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    user: AuthenticatedUserId,
    path: web::Path<(i32, i32)>,
) -> Result<impl Responder, AppError> {
    let (list_id, task_id) = path.into_inner();
    state
        .tasks
        .delete_task_in_list(list_id, task_id, user.0)
        .await?;
    Ok(response::ok("Task deleted successfully"))
}
