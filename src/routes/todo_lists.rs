use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use validator::Validate;

use crate::auth::AuthenticatedUserId;
use crate::error::AppError;
use crate::models::{TodoList, TodoListInput};
use crate::routes::response::{self, Envelope};
use crate::state::AppState;

/// All lists of the caller, each with its tasks.
///
/// ## Responses:
/// - `200 OK`: JSON array of lists, possibly empty.
/// - `401 Unauthorized`: missing, invalid or expired token.
#[utoipa::path(
    get,
    path = "/todolists",
    tag = "todolists",
    responses(
        (status = 200, description = "The caller's lists", body = [TodoList]),
        (status = 401, description = "Missing or invalid token", body = Envelope)
    ),
    security(("bearer_auth" = []))
)]
#[get("")]
pub async fn get_lists(
    state: web::Data<AppState>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let lists = state.lists.get_all_lists(user.0).await?;
    Ok(HttpResponse::Ok().json(lists))
}

/// Creates an empty list owned by the caller.
///
/// ## Responses:
/// - `201 Created`: `ok` envelope.
/// - `400 Bad Request`: malformed body, empty or oversized title.
/// - `401 Unauthorized`: missing, invalid or expired token.
#[utoipa::path(
    post,
    path = "/todolists",
    tag = "todolists",
    request_body = TodoListInput,
    responses(
        (status = 201, description = "List created", body = Envelope),
        (status = 400, description = "Invalid input", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = Envelope)
    ),
    security(("bearer_auth" = []))
)]
#[post("")]
pub async fn create_list(
    state: web::Data<AppState>,
    user: AuthenticatedUserId,
    body: web::Json<TodoListInput>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    state.lists.create_list(&body.title, user.0).await?;
    Ok(response::created("TodoList was successfully created"))
}

/// One list of the caller with its tasks.
///
/// ## Responses:
/// - `200 OK`: the list.
/// - `400 Bad Request`: non-numeric or non-positive id.
/// - `401 Unauthorized`: missing, invalid or expired token.
/// - `404 Not Found`: the list does not exist or belongs to someone else.
#[utoipa::path(
    get,
    path = "/todolists/{id}",
    tag = "todolists",
    params(("id" = i32, Path, description = "Todo list id")),
    responses(
        (status = 200, description = "The list", body = TodoList),
        (status = 400, description = "Invalid id", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = Envelope),
        (status = 404, description = "List not found", body = Envelope)
    ),
    security(("bearer_auth" = []))
)]
#[get("/{id}")]
pub async fn get_list(
    state: web::Data<AppState>,
    user: AuthenticatedUserId,
    path: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let list = state.lists.get_list_by_id(path.into_inner(), user.0).await?;
    Ok(HttpResponse::Ok().json(list))
}

/// Renames a list.
///
/// ## Responses:
/// - `200 OK`: `ok` envelope.
/// - `400 Bad Request`: malformed body, empty or oversized title, invalid id.
/// - `401 Unauthorized`: missing, invalid or expired token.
/// - `404 Not Found`: the list does not exist or belongs to someone else.
#[utoipa::path(
    patch,
    path = "/todolists/{id}",
    tag = "todolists",
    params(("id" = i32, Path, description = "Todo list id")),
    request_body = TodoListInput,
    responses(
        (status = 200, description = "List updated", body = Envelope),
        (status = 400, description = "Invalid input", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = Envelope),
        (status = 404, description = "List not found", body = Envelope)
    ),
    security(("bearer_auth" = []))
)]
#[patch("/{id}")]
pub async fn update_list(
    state: web::Data<AppState>,
    user: AuthenticatedUserId,
    path: web::Path<i32>,
    body: web::Json<TodoListInput>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    state
        .lists
        .update_list(path.into_inner(), user.0, &body.title)
        .await?;
    Ok(response::ok("List updated successfully"))
}

/// Deletes the list together with all of its tasks.
///
/// ## Responses:
/// - `200 OK`: `ok` envelope.
/// - `400 Bad Request`: non-numeric or non-positive id.
/// - `401 Unauthorized`: missing, invalid or expired token.
/// - `404 Not Found`: the list does not exist or belongs to someone else.
#[utoipa::path(
    delete,
    path = "/todolists/{id}",
    tag = "todolists",
    params(("id" = i32, Path, description = "Todo list id")),
    responses(
        (status = 200, description = "List and its tasks deleted", body = Envelope),
        (status = 400, description = "Invalid id", body = Envelope),
        (status = 401, description = "Missing or invalid token", body = Envelope),
        (status = 404, description = "List not found", body = Envelope)
    ),
    security(("bearer_auth" = []))
)]
#[delete("/{id}")]
pub async fn delete_list(
    state: web::Data<AppState>,
    user: AuthenticatedUserId,
    path: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    state.lists.delete_list(path.into_inner(), user.0).await?;
    Ok(response::ok("List deleted successfully"))
}
