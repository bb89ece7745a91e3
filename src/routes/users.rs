use crate::{error::AppError, models::RegisterRequest, services::UserService};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Hashes the password and stores the account. Responds `200 OK` with the
/// user (id, username, email, createdAt); the password is never echoed.
/// A taken username or invalid input answers `400 Bad Request`.
#[post("/register")]
pub async fn register(
    users: web::Data<UserService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let user = users.register(register_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}
