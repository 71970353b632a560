//!
//! # Custom Error Handling
//!
//! This module defines the `AppError` type returned by repositories, services and
//! handlers. Every variant belongs to exactly one [`ErrorKind`], and both the HTTP
//! mapping and any caller that needs to branch on a failure compare kinds rather
//! than messages.
//!
//! `AppError` implements `actix_web::error::ResponseError`, rendering the uniform
//! `{"status": "error", "message": ...}` envelope. `From` implementations for
//! `sqlx::Error`, `validator::ValidationErrors`, `jsonwebtoken::errors::Error` and
//! `bcrypt::BcryptError` allow conversion with the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;
use validator::ValidationErrors;

use crate::routes::response::Envelope;

/// Message shared by every login failure so callers cannot tell an unknown
/// username from a wrong password.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// The error taxonomy exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed body, bad numeric id, or empty required field (HTTP 400).
    InvalidInput,
    /// Missing, invalid or expired token, or failed login (HTTP 401).
    Unauthorized,
    /// Duplicate username (HTTP 409).
    Conflict,
    /// Resource absent or owned by someone else (HTTP 404).
    NotFound,
    /// Unexpected failure (HTTP 500).
    Internal,
}

impl ErrorKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// The request was malformed or failed validation.
    InvalidInput(String),
    /// Authentication is required but missing, or the presented token was rejected.
    Unauthorized(String),
    /// Registration attempted with a username that is already taken.
    UserAlreadyExists,
    /// Login attempted for a username that does not exist.
    UserNotFound,
    /// Login attempted with the wrong password.
    InvalidCredentials,
    /// bcrypt failed to hash or verify a password.
    HashingFailed(String),
    /// The requested record does not exist or is not owned by the requester.
    NotFound(String),
    /// Wraps errors from the `sqlx` crate other than `RowNotFound`.
    DatabaseError(String),
    /// Any other unexpected server-side failure.
    InternalServerError(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidInput(_) => ErrorKind::InvalidInput,
            AppError::Unauthorized(_) | AppError::UserNotFound | AppError::InvalidCredentials => {
                ErrorKind::Unauthorized
            }
            AppError::UserAlreadyExists => ErrorKind::Conflict,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::HashingFailed(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_) => ErrorKind::Internal,
        }
    }

    /// The message placed in the response envelope. Internal details never leave the server.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) | AppError::Unauthorized(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
            AppError::UserAlreadyExists => "Username already exists".to_string(),
            AppError::UserNotFound | AppError::InvalidCredentials => INVALID_CREDENTIALS.to_string(),
            AppError::HashingFailed(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_) => "Internal server error".to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid Input: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::UserAlreadyExists => write!(f, "Conflict: user already exists"),
            AppError::UserNotFound => write!(f, "Unauthorized: user not found"),
            AppError::InvalidCredentials => write!(f, "Unauthorized: invalid credentials"),
            AppError::HashingFailed(msg) => write!(f, "Hashing Error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects carrying the error envelope.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }

    fn error_response(&self) -> HttpResponse {
        if self.kind() == ErrorKind::Internal {
            log::error!("{}", self);
        }
        HttpResponse::build(self.status_code()).json(Envelope::error(self.public_message()))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes `NotFound`; a unique violation on `users.username` becomes
/// `UserAlreadyExists`. Everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::UserAlreadyExists
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Only the names of the offending fields reach the client.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        let mut fields: Vec<&str> = error.field_errors().into_keys().collect();
        fields.sort_unstable();
        if fields.is_empty() {
            return AppError::InvalidInput("Invalid input".into());
        }
        AppError::InvalidInput(format!("Invalid input: {}", fields.join(", ")))
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::HashingFailed(error.to_string())
    }
}
