use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::models::{NewTask, Task, TaskInput, TaskUpdate, User};
use crate::repository::TaskRepository;

/// Task operations, always on behalf of an authenticated owner.
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Task {} not found", id))
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    pub async fn create_task(&self, owner: &User, input: TaskInput) -> Result<Task, AppError> {
        input.validate()?;
        let task = self.tasks.insert_task(NewTask::new(input, owner)).await?;
        log::debug!("User {} created task {}", owner.id, task.id);
        Ok(task)
    }

    pub async fn tasks_for_user(&self, owner: &User) -> Result<Vec<Task>, AppError> {
        self.tasks.find_tasks_by_user(owner.id).await
    }

    pub async fn get_task(&self, owner: &User, id: i64) -> Result<Task, AppError> {
        self.tasks
            .find_task_for_user(id, owner.id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn update_task(
        &self,
        owner: &User,
        id: i64,
        update: TaskUpdate,
    ) -> Result<Task, AppError> {
        update.validate()?;
        let mut task = self.get_task(owner, id).await?;
        task.apply(update);
        self.tasks.update_task(&task).await
    }

    /// Deletes a task the owner holds. Someone else's task is reported as missing.
    pub async fn delete_task(&self, owner: &User, id: i64) -> Result<(), AppError> {
        if self.tasks.delete_task_for_user(id, owner.id).await? {
            log::debug!("User {} deleted task {}", owner.id, id);
            Ok(())
        } else {
            Err(not_found(id))
        }
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.tasks.count_tasks().await
    }
}
