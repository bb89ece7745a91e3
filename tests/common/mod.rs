#![allow(dead_code)]

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test,
};
use routine::auth::basic_authorization;
use routine::models::User;
use routine::repository::MemoryStore;
use routine::Services;
use serde_json::json;
use std::sync::Arc;

/// Lowest bcrypt work factor; keeps registration fast in tests.
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn memory_services() -> Services {
    Services::from_store(Arc::new(MemoryStore::new()), TEST_BCRYPT_COST)
}

/// Builds the full application (routes, auth middleware, JSON config) over `$services`.
macro_rules! init_app {
    ($services:expr) => {{
        let services = $services.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(move |cfg| services.configure(cfg))
                .wrap(actix_web::middleware::Logger::default())
                .configure(routine::routes::config),
        )
    }};
}
pub(crate) use init_app;

/// Registered credentials plus the header value to send them.
pub struct TestUser {
    pub user: User,
    pub password: String,
    pub authorization: String,
}

pub async fn register_user(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> TestUser {
    let req = test::TestRequest::post()
        .uri("/api/users/register")
        .set_json(json!({
            "username": username,
            "password": password,
            "email": format!("{}@example.com", username)
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        StatusCode::OK,
        "Registration of {} failed. Body: {:?}",
        username,
        String::from_utf8_lossy(&body)
    );

    let user: User = serde_json::from_slice(&body).expect("Failed to parse registered user");
    TestUser {
        user,
        password: password.to_string(),
        authorization: basic_authorization(username, password),
    }
}

/// A `TestRequest` carrying the user's Basic credentials.
pub fn authed(request: test::TestRequest, user: &TestUser) -> test::TestRequest {
    request.insert_header((header::AUTHORIZATION, user.authorization.clone()))
}

/// Calls the app and returns the status with the body parsed as JSON (`Null` if empty).
pub async fn send(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    request: test::TestRequest,
) -> (StatusCode, serde_json::Value) {
    let resp = test::call_service(app, request.to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| {
            panic!(
                "Response body is not JSON: {:?}",
                String::from_utf8_lossy(&body)
            )
        })
    };
    (status, json)
}
