pub mod task;
pub mod user;

use actix_web::web;
use std::sync::Arc;

use crate::repository::{TaskRepository, UserRepository};

pub use task::TaskService;
pub use user::UserService;

/// Both services, shared by every worker as `web::Data`.
#[derive(Clone)]
pub struct Services {
    pub users: web::Data<UserService>,
    pub tasks: web::Data<TaskService>,
}

impl Services {
    /// Builds both services over one store implementing both repositories.
    pub fn from_store<S>(store: Arc<S>, bcrypt_cost: u32) -> Self
    where
        S: UserRepository + TaskRepository + 'static,
    {
        let users: Arc<dyn UserRepository> = store.clone();
        let tasks: Arc<dyn TaskRepository> = store;
        Self {
            users: web::Data::new(UserService::new(users, bcrypt_cost)),
            tasks: web::Data::new(TaskService::new(tasks)),
        }
    }

    /// Registers the services as app data.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.users.clone()).app_data(self.tasks.clone());
    }
}
