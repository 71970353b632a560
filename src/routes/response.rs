use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The `{"status": ..., "message": ...}` body used by every response that does not
/// carry a resource.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Envelope {
    pub status: String,
    pub message: String,
}

impl Envelope {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

/// 200 with an `ok` envelope.
pub fn ok(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::ok(message))
}

/// 201 with an `ok` envelope.
pub fn created(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Created().json(Envelope::ok(message))
}
