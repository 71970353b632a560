pub mod auth;
pub mod docs;
pub mod health;
pub mod response;
pub mod tasks;
pub mod todo_lists;

use actix_web::{error, web, HttpRequest};

use crate::auth::AuthMiddleware;
use crate::error::AppError;
use crate::state::AppState;

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidInput(format!("Invalid request body: {}", err)).into()
}

fn path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidInput(format!("Invalid ID: {}", err)).into()
}

/// Registers every route together with the shared state and extractor error handlers.
///
/// `/health`, `/api-docs/openapi.json`, `/register` and `/login` are public; everything under `/todolists`
/// requires a bearer token.
pub fn config(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(web::Data::new(state.clone()))
        .app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(health::health)
        .service(docs::openapi_json)
        .service(auth::register)
        .service(auth::login)
        .service(
            web::scope("/todolists")
                .wrap(AuthMiddleware::new(state.auth_config().clone()))
                .service(todo_lists::get_lists)
                .service(todo_lists::create_list)
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task)
                .service(todo_lists::get_list)
                .service(todo_lists::update_list)
                .service(todo_lists::delete_list),
        );
}
