use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{TaskInput, TaskResponse, TaskUpdate},
    services::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

/// Lists the authenticated user's tasks.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks, oldest first, each with its owner embedded.
/// - `401 Unauthorized`: missing or wrong Basic credentials.
#[get("")]
pub async fn get_tasks(
    tasks: web::Data<TaskService>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let body: Vec<TaskResponse> = tasks
        .tasks_for_user(&user)
        .await?
        .into_iter()
        .map(|task| task.into_response(&user))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Creates a task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: required, 1 to 200 characters.
/// - `description` (optional): up to 1000 characters.
/// - `dueDate`: required, e.g. `2030-05-01T09:30:00` or `2030-05-01`.
/// - `complete` (optional): defaults to `false`.
///
/// ## Responses:
/// - `200 OK`: the created task.
/// - `400 Bad Request`: malformed JSON or invalid fields.
/// - `401 Unauthorized`: missing or wrong Basic credentials.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskService>,
    task_data: web::Json<TaskInput>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks.create_task(&user, task_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task.into_response(&user)))
}

/// Fetches one task. Tasks of other users answer `404 Not Found`.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskService>,
    task_id: web::Path<i64>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks.get_task(&user, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task.into_response(&user)))
}

/// Partially updates a task: only the fields present in the body change.
/// `{"complete": true}` (or `{"completed": true}`) marks it done.
///
/// ## Responses:
/// - `200 OK`: the updated task.
/// - `400 Bad Request`: invalid fields.
/// - `404 Not Found`: no such task for this user.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskService>,
    task_id: web::Path<i64>,
    task_data: web::Json<TaskUpdate>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks
        .update_task(&user, task_id.into_inner(), task_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(task.into_response(&user)))
}

/// Deletes a task.
///
/// ## Responses:
/// - `200 OK`: empty body on success.
/// - `404 Not Found`: no such task for this user.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskService>,
    task_id: web::Path<i64>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    tasks.delete_task(&user, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}
