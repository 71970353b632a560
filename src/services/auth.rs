use std::sync::Arc;

use crate::auth::{generate_token, hash_password, verify_password, AuthConfig};
use crate::error::AppError;
use crate::models::User;
use crate::repository::UserRepository;

/// Registration and login.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, config: AuthConfig) -> Self {
        Self { users, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Creates an account. Fails with `UserAlreadyExists` if the username is taken
    /// and with `HashingFailed` if bcrypt rejects the password.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::UserAlreadyExists);
        }

        let password_hash = hash_password(password, self.config.bcrypt_cost)?;
        let user = self.users.create_user(username, &password_hash).await?;
        log::info!("registered user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// Checks the credentials and returns a signed token for the user.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let token = generate_token(&self.config, user.id)?;
        log::info!("user {} logged in", user.id);
        Ok(token)
    }
}
