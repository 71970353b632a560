use actix_web::{get, HttpResponse, Responder};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::{LoginRequest, RegisterRequest};
use crate::models::{NewTaskInput, Task, TaskPatch, TodoList, TodoListInput};
use crate::routes::response::Envelope;
use crate::routes::{auth, health, tasks, todo_lists};

/// OpenAPI document for every route.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo list API",
        description = "Per-user todo lists and tasks behind JWT bearer authentication."
    ),
    paths(
        health::health,
        auth::register,
        auth::login,
        todo_lists::get_lists,
        todo_lists::create_list,
        todo_lists::get_list,
        todo_lists::update_list,
        todo_lists::delete_list,
        tasks::get_tasks,
        tasks::create_task,
        tasks::get_task,
        tasks::update_task,
        tasks::delete_task
    ),
    components(schemas(
        Envelope,
        RegisterRequest,
        LoginRequest,
        TodoList,
        TodoListInput,
        Task,
        NewTaskInput,
        TaskPatch
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth", description = "Registration and login"),
        (name = "todolists", description = "The caller's todo lists"),
        (name = "tasks", description = "Tasks inside a todo list")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Serves the OpenAPI document as JSON.
#[get("/api-docs/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
