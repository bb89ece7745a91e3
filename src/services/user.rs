use actix_web::web;
use std::sync::Arc;
use tokio::sync::OnceCell;
use validator::Validate;

use crate::auth::{hash_password, verify_password};
use crate::error::AppError;
use crate::models::{NewUser, RegisterRequest, User};
use crate::repository::UserRepository;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Password hashed once for unknown usernames, so they cost one bcrypt verify
/// like known ones.
const UNKNOWN_USER_PASSWORD: &str = "routine-unknown-user";

/// Registration and credential checks.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
    unknown_user_hash: OnceCell<String>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self {
            users,
            bcrypt_cost,
            unknown_user_hash: OnceCell::new(),
        }
    }

    async fn unknown_user_hash(&self) -> Result<String, AppError> {
        let cost = self.bcrypt_cost;
        self.unknown_user_hash
            .get_or_try_init(|| async move {
                web::block(move || hash_password(UNKNOWN_USER_PASSWORD, cost)).await?
            })
            .await
            .cloned()
    }

    /// Validates the request, hashes the password and persists the user.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        request.validate()?;

        if self
            .users
            .find_user_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest("Username already taken".into()));
        }

        let cost = self.bcrypt_cost;
        let password = request.password;
        let password_hash = web::block(move || hash_password(&password, cost)).await??;

        let user = self
            .users
            .insert_user(NewUser {
                username: request.username,
                email: request.email,
                password_hash,
            })
            .await?;
        log::info!("Registered user {} (id {})", user.username, user.id);
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<User, AppError> {
        self.users
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))
    }

    /// Checks `password` against the stored hash. Unknown users and wrong
    /// passwords produce the same `Unauthorized` error, and both run one
    /// bcrypt verify.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = self.users.find_user_by_username(username).await?;
        let password_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.unknown_user_hash().await?,
        };

        let password = password.to_owned();
        let matches = web::block(move || verify_password(&password, &password_hash)).await??;

        match user {
            Some(user) if matches => Ok(user),
            _ => Err(AppError::Unauthorized(INVALID_CREDENTIALS.into())),
        }
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.users.count_users().await
    }

    pub fn backend(&self) -> &'static str {
        self.users.backend()
    }
}
