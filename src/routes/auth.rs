use crate::{
    auth::{basic_authorization, LoginRequest, LoginResponse},
    error::AppError,
    services::UserService,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Login user
///
/// Checks the username and password and returns the `Authorization` header
/// value the client should replay on every protected request.
#[post("/login")]
pub async fn login(
    users: web::Data<UserService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let LoginRequest { username, password } = login_data.into_inner();
    log::info!("Login attempt for user: {}", username);

    match users.authenticate(&username, &password).await {
        Ok(user) => {
            log::info!("User authenticated successfully: {}", user.username);
            Ok(HttpResponse::Ok().json(LoginResponse {
                token: basic_authorization(&user.username, &password),
                username: user.username,
            }))
        }
        Err(err) => {
            log::warn!("Authentication failed for user: {}", username);
            Err(err)
        }
    }
}
