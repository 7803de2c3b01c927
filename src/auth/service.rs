//! Authentication Service
//!
//! Registration, login and bearer token resolution.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::domain::{AuthenticatedUser, NewUser, User};
use crate::error::{AppError, AppResult};
use crate::store::UserStore;

use super::password::{hash_password, verify_password};
use super::token::TokenService;

/// Longest username accepted, in characters
pub const MAX_USERNAME_CHARS: usize = 50;

/// Longest email accepted, in characters
pub const MAX_EMAIL_CHARS: usize = 100;

/// Stand-in password hashed once and checked when a login names no user
const DUMMY_PASSWORD: &str = "expense-tracker-dummy-password";

/// Command to register a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCommand {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    fn validate(&self) -> AppResult<()> {
        for (name, value) in [
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::InvalidRequest(format!("{name} must not be blank")));
            }
        }

        for (name, value, max) in [
            ("username", &self.username, MAX_USERNAME_CHARS),
            ("email", &self.email, MAX_EMAIL_CHARS),
        ] {
            if value.chars().count() > max {
                return Err(AppError::InvalidRequest(format!(
                    "{name} must be at most {max} characters"
                )));
            }
        }

        Ok(())
    }
}

/// Result of a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

/// Verifies credentials and issues tokens.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenService,
    bcrypt_cost: u32,
    dummy_hash: Arc<OnceCell<String>>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self {
            users,
            tokens,
            bcrypt_cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Check a username/password pair and issue a token.
    ///
    /// Unknown usernames and wrong passwords fail the same way, and both pay
    /// for one bcrypt verification at the configured cost.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        let Some(user) = self.users.find_user_by_username(username).await? else {
            let dummy_hash = self.dummy_hash().await?;
            verify_password(password, dummy_hash).await?;
            tracing::info!(username = %username, "Login rejected: unknown user");
            return Err(AppError::AuthenticationFailed);
        };

        if !verify_password(password, &user.password_hash).await? {
            tracing::info!(username = %username, "Login rejected: wrong password");
            return Err(AppError::AuthenticationFailed);
        }

        let token = self.tokens.issue(&user.username)?;

        tracing::info!(user_id = user.id, username = %user.username, "User logged in");

        Ok(LoginResult {
            token,
            user_id: user.id,
            username: user.username,
            email: user.email,
        })
    }

    /// Hash of [`DUMMY_PASSWORD`] at the configured cost, computed on first use
    async fn dummy_hash(&self) -> AppResult<&str> {
        let hash = self
            .dummy_hash
            .get_or_try_init(|| hash_password(DUMMY_PASSWORD, self.bcrypt_cost))
            .await?;
        Ok(hash.as_str())
    }

    /// Create a user with a hashed password.
    pub async fn register(&self, command: RegisterCommand) -> AppResult<User> {
        command.validate()?;

        if self.users.username_exists(&command.username).await? {
            return Err(AppError::Conflict(
                "Error: Username is already taken!".to_string(),
            ));
        }

        if self.users.email_exists(&command.email).await? {
            return Err(AppError::Conflict("Error: Email is already in use!".to_string()));
        }

        let password_hash = hash_password(&command.password, self.bcrypt_cost).await?;

        // A concurrent registration can still win the race; the store's
        // unique constraints turn that into the same conflict.
        let user = self
            .users
            .insert_user(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Turn a bearer token into the caller identity.
    pub async fn resolve(&self, token: &str) -> AppResult<AuthenticatedUser> {
        let claims = self.tokens.verify(token)?;

        let user = self
            .users
            .find_user_by_username(&claims.sub)
            .await?
            .ok_or_else(|| {
                tracing::debug!("Token subject {} no longer exists", claims.sub);
                AppError::InvalidToken
            })?;

        Ok(AuthenticatedUser::new(user.id, user.username))
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("tokens", &self.tokens)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish_non_exhaustive()
    }
}
