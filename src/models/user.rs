use serde::Serialize;
use sqlx::FromRow;

/// A registered account. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}
