pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::{auth::AuthMiddleware, error::AppError};

/// Malformed or incomplete JSON bodies become `400` with the usual error body.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Mounts `/health` and the `/api` scope. Expects a `Services` set registered
/// as app data (see `Services::configure`).
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(health::health).service(
        web::scope("/api")
            .wrap(AuthMiddleware)
            .service(web::scope("/users").service(users::register))
            .service(web::scope("/auth").service(auth::login))
            .service(
                web::scope("/tasks")
                    .service(tasks::get_tasks)
                    .service(tasks::create_task)
                    .service(tasks::get_task)
                    .service(tasks::update_task)
                    .service(tasks::delete_task),
            ),
    );
}
