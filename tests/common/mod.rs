#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, App};
use serde_json::{json, Value};

use todolist_api::auth::AuthConfig;
use todolist_api::routes;
use todolist_api::testing::MemoryStore;
use todolist_api::AppState;

pub const PASSWORD: &str = "P@ssw0rd123";

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        secret: "integration_test_secret".to_string(),
        token_ttl: chrono::Duration::hours(1),
        bcrypt_cost: 4,
    }
}

pub fn memory_state() -> (MemoryStore, AppState) {
    let store = MemoryStore::new();
    let state = AppState::in_memory(store.clone(), auth_config());
    (store, state)
}

pub async fn init_app(
    state: AppState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .wrap(Logger::default())
            .configure(move |cfg| routes::config(cfg, &state)),
    )
    .await
}

/// Sends `req` and returns the status with the decoded JSON body (`Null` when empty).
pub async fn send(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    req: test::TestRequest,
) -> (StatusCode, Value) {
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    let bytes = test::read_body(resp).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            panic!(
                "response is not JSON ({}): {}",
                e,
                String::from_utf8_lossy(&bytes)
            )
        })
    };
    (status, body)
}

/// Registers `username` and logs in, returning the bearer token.
pub async fn register_and_login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
) -> String {
    let credentials = json!({ "username": username, "password": PASSWORD });

    let (status, body) = send(
        app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(&credentials),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

    let (status, body) = send(
        app,
        test::TestRequest::post().uri("/login").set_json(&credentials),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["message"]
        .as_str()
        .expect("token in login envelope")
        .to_string()
}

pub fn authed(req: test::TestRequest, token: &str) -> test::TestRequest {
    req.insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
}

/// Creates a list and returns its id, looked up through `GET /todolists`.
pub async fn create_list(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    token: &str,
    title: &str,
) -> i64 {
    let (status, _) = send(
        app,
        authed(test::TestRequest::post().uri("/todolists"), token)
            .set_json(json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, lists) = send(app, authed(test::TestRequest::get().uri("/todolists"), token)).await;
    lists
        .as_array()
        .and_then(|lists| lists.iter().rev().find(|list| list["title"] == title))
        .and_then(|list| list["id"].as_i64())
        .expect("created list is listed")
}

/// Creates a task in `list_id` and returns its id.
pub async fn create_task(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    token: &str,
    list_id: i64,
    title: &str,
) -> i64 {
    let uri = format!("/todolists/{}/tasks", list_id);
    let (status, body) = send(
        app,
        authed(test::TestRequest::post().uri(&uri), token)
            .set_json(json!({ "title": title, "description": "details" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create task failed: {}", body);

    let (_, tasks) = send(app, authed(test::TestRequest::get().uri(&uri), token)).await;
    tasks
        .as_array()
        .and_then(|tasks| tasks.iter().rev().find(|task| task["title"] == title))
        .and_then(|task| task["id"].as_i64())
        .expect("created task is listed")
}
