use actix_web::{post, web, Responder};
use validator::Validate;

use crate::auth::{LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::routes::response::{self, Envelope};
use crate::state::AppState;

/// Register a new user
///
/// ## Responses:
/// - `201 Created`: `ok` envelope.
/// - `400 Bad Request`: malformed body, or username or password fails validation.
/// - `409 Conflict`: the username is taken.
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = Envelope),
        (status = 400, description = "Invalid input", body = Envelope),
        (status = 409, description = "Username already exists", body = Envelope)
    )
)]
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    state.auth.register(&body.username, &body.password).await?;
    Ok(response::created("User registered successfully"))
}

/// Login user
///
/// ## Responses:
/// - `200 OK`: `ok` envelope whose message is the bearer token.
/// - `400 Bad Request`: malformed body.
/// - `401 Unauthorized`: unknown username or wrong password (same body for both).
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued; `message` holds the JWT", body = Envelope),
        (status = 400, description = "Invalid input", body = Envelope),
        (status = 401, description = "Invalid credentials", body = Envelope)
    )
)]
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let token = state.auth.login(&body.username, &body.password).await?;
    Ok(response::ok(token))
}
