use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Settings shared by token issuance, token verification and password hashing.
///
/// Built once from [`crate::config::Config`] at startup and handed to the auth
/// service and the middleware.
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify tokens.
    pub secret: String,
    /// How long an issued token stays valid.
    pub token_ttl: chrono::Duration,
    /// bcrypt work factor.
    pub bcrypt_cost: u32,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Represents the claims encoded within a JWT.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the authenticated user.
    pub user_id: i32,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Generates an HS256 token for `user_id`, valid for `config.token_ttl`.
pub fn generate_token(config: &AuthConfig, user_id: i32) -> Result<String, AppError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(config.token_ttl)
        .ok_or_else(|| AppError::InternalServerError("token expiry overflow".into()))?
        .timestamp() as usize;

    let claims = Claims {
        user_id,
        exp: expiration,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a token's signature and expiry and returns its claims.
///
/// Returns `AppError::Unauthorized` if the token is malformed, signed with another
/// secret or algorithm, or expired.
pub fn verify_token(config: &AuthConfig, token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(AppError::from)
}
