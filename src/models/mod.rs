pub mod task;
pub mod user;

pub use task::{NewTask, Task, TaskInput, TaskResponse, TaskUpdate};
pub use user::{NewUser, RegisterRequest, User};
