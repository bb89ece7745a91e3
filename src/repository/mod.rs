//! Persistence for users and tasks.
//!
//! Two backends implement the same pair of traits: [`PgStore`] on Postgres via
//! sqlx, and [`MemoryStore`] for running without a database and for tests.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{NewTask, NewUser, Task, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// User storage operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new user. A taken username is a `BadRequest`.
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn count_users(&self) -> Result<i64, AppError>;

    /// Short name of the storage backend, e.g. `"postgres"`.
    fn backend(&self) -> &'static str;
}

/// Task storage operations. Lookups that take a `user_id` only match tasks
/// owned by that user.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persists a new task. An unknown owner is a `BadRequest`.
    async fn insert_task(&self, task: NewTask) -> Result<Task, AppError>;

    /// All tasks of one user, oldest first.
    async fn find_tasks_by_user(&self, user_id: i64) -> Result<Vec<Task>, AppError>;

    async fn find_task_for_user(&self, id: i64, user_id: i64) -> Result<Option<Task>, AppError>;

    /// Writes back title, description, due date and completion flag.
    async fn update_task(&self, task: &Task) -> Result<Task, AppError>;

    /// Returns whether a task was deleted.
    async fn delete_task_for_user(&self, id: i64, user_id: i64) -> Result<bool, AppError>;

    async fn count_tasks(&self) -> Result<i64, AppError>;
}
