pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, AuthConfig, Claims};

/// Represents the payload for a new user registration request.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Desired username for the new account. Required, at most 32 characters.
    #[validate(length(min = 1, max = 32))]
    pub username: String,
    /// Password for the new account.
    /// Required, at most 72 bytes (the most bcrypt reads).
    #[validate(length(min = 1), custom = "validate_password_bytes")]
    pub password: String,
}

fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > 72 {
        return Err(ValidationError::new("password_too_long"));
    }
    Ok(())
}

/// Represents the payload for a user login request.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}
