use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{TaskRepository, UserRepository};
use crate::error::AppError;
use crate::models::{NewTask, NewUser, Task, User};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    tasks: BTreeMap<i64, Task>,
    last_user_id: i64,
    last_task_id: i64,
}

/// In-process store with the same constraints as the Postgres schema:
/// unique usernames and tasks that must reference an existing user.
///
/// Both tables sit behind one lock so the foreign-key check and the insert
/// happen atomically.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(AppError::BadRequest("Username already taken".into()));
        }

        tables.last_user_id += 1;
        let created = User {
            id: tables.last_user_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn count_users(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.users.len() as i64)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn insert_task(&self, task: NewTask) -> Result<Task, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&task.user_id) {
            return Err(AppError::BadRequest("Referenced user does not exist".into()));
        }

        tables.last_task_id += 1;
        let created = Task {
            id: tables.last_task_id,
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            complete: task.complete,
            user_id: task.user_id,
            created_at: Utc::now(),
        };
        tables.tasks.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_tasks_by_user(&self, user_id: i64) -> Result<Vec<Task>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_task_for_user(&self, id: i64, user_id: i64) -> Result<Option<Task>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .get(&id)
            .filter(|t| t.user_id == user_id)
            .cloned())
    }

    async fn update_task(&self, task: &Task) -> Result<Task, AppError> {
        let mut tables = self.tables.write().await;
        match tables.tasks.get_mut(&task.id) {
            Some(stored) if stored.user_id == task.user_id => {
                stored.title = task.title.clone();
                stored.description = task.description.clone();
                stored.due_date = task.due_date;
                stored.complete = task.complete;
                Ok(stored.clone())
            }
            _ => Err(AppError::NotFound("Task not found".into())),
        }
    }

    async fn delete_task_for_user(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let owned = tables.tasks.get(&id).is_some_and(|t| t.user_id == user_id);
        if owned {
            tables.tasks.remove(&id);
        }
        Ok(owned)
    }

    async fn count_tasks(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.tasks.len() as i64)
    }
}
