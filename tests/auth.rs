mod common;

use actix_web::http::{header, Method, StatusCode};
use actix_web::{rt, test, App, HttpServer};
use common::{authed, init_app, memory_services, register_user, send};
use pretty_assertions::assert_eq;
use routine::auth::{basic_authorization, LoginResponse};
use serde_json::json;
use std::net::TcpListener;

#[test_log::test(actix_rt::test)]
async fn test_register_and_login_flow() {
    let services = memory_services();
    let app = init_app!(services).await;

    register_user(&app, "testuser", "testpassword").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "testuser", "password": "testpassword" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let login: LoginResponse = test::read_body_json(resp).await;

    assert_eq!(login.username, "testuser");
    assert_eq!(
        login.token,
        basic_authorization("testuser", "testpassword")
    );

    // The token is replayed verbatim as the Authorization header.
    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/tasks")
            .insert_header((header::AUTHORIZATION, login.token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Body: {}", body);
    assert_eq!(body, json!([]));
}

#[actix_rt::test]
async fn test_invalid_login_inputs() {
    let services = memory_services();
    let app = init_app!(services).await;

    register_user(&app, "login_test_user", "Password123!").await;

    let test_cases = vec![
        (
            json!({ "password": "Password123!" }),
            StatusCode::BAD_REQUEST,
            "missing username",
        ),
        (
            json!({ "username": "login_test_user" }),
            StatusCode::BAD_REQUEST,
            "missing password",
        ),
        (
            json!({ "username": "login_test_user", "password": "WrongPassword123!" }),
            StatusCode::UNAUTHORIZED,
            "incorrect password",
        ),
        (
            json!({ "username": "nonexistent", "password": "Password123!" }),
            StatusCode::UNAUTHORIZED,
            "non-existent user",
        ),
    ];

    for (payload, expected_status, description) in test_cases {
        let (status, body) = send(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(&payload),
        )
        .await;

        assert_eq!(
            status, expected_status,
            "Test case failed: {}. Body: {}",
            description, body
        );
        if expected_status == StatusCode::UNAUTHORIZED {
            assert_eq!(body["error"], "Invalid username or password");
        }
    }
}

#[actix_rt::test]
async fn test_protected_routes_require_basic_credentials() {
    let services = memory_services();
    let app = init_app!(services).await;

    let user = register_user(&app, "testuser", "testpassword").await;

    // No credentials at all.
    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/tasks").to_request())
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Basic realm=\"routine\"")
    );

    let bad_headers = vec![
        (basic_authorization("testuser", "wrongpassword"), "wrong password"),
        (basic_authorization("ghost", "testpassword"), "unknown user"),
        ("Bearer dummy-token".to_string(), "bearer scheme"),
        ("Basic not-base64!".to_string(), "malformed base64"),
        ("Basic".to_string(), "empty basic"),
    ];

    for (value, description) in bad_headers {
        let (status, body) = send(
            &app,
            test::TestRequest::get()
                .uri("/api/tasks")
                .insert_header((header::AUTHORIZATION, value)),
        )
        .await;
        assert_eq!(
            status,
            StatusCode::UNAUTHORIZED,
            "Test case failed: {}. Body: {}",
            description,
            body
        );
    }

    let (status, _) = send(&app, authed(test::TestRequest::get().uri("/api/tasks"), &user)).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_rt::test]
async fn test_health_is_public() {
    let services = memory_services();
    let app = init_app!(services).await;

    let (status, body) = send(&app, test::TestRequest::get().uri("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[actix_rt::test]
async fn test_cors_preflight_passes_auth_middleware() {
    let services = memory_services();
    let origin = "http://localhost:3000";
    let app = test::init_service(
        App::new()
            .configure(move |cfg| services.configure(cfg))
            .wrap(routine::security::cors(origin))
            .wrap(actix_web::middleware::Logger::default())
            .configure(routine::routes::config),
    )
    .await;

    // Browsers send preflights without credentials.
    for (uri, method) in [
        ("/api/tasks", "POST"),
        ("/api/tasks/1", "PUT"),
        ("/api/tasks/1", "DELETE"),
        ("/api/auth/login", "POST"),
    ] {
        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri(uri)
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, method))
            .insert_header((
                header::ACCESS_CONTROL_REQUEST_HEADERS,
                "authorization,content-type",
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK, "Preflight {} {}", method, uri);
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some(origin)
        );
    }

    // The actual request is still authenticated, and its 401 carries CORS headers.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/tasks")
            .insert_header((header::ORIGIN, origin))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[actix_rt::test]
async fn test_create_task_unauthorized_over_http() {
    let services = memory_services();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let server_services = services.clone();
    let server = HttpServer::new(move || {
        let services = server_services.clone();
        App::new()
            .configure(move |cfg| services.configure(cfg))
            .wrap(routine::security::cors("http://localhost:3000"))
            .configure(routine::routes::config)
    })
    .workers(1)
    .bind(("127.0.0.1", port))
    .unwrap_or_else(|_| panic!("Failed to bind to port {}", port))
    .run();
    let handle = server.handle();
    rt::spawn(server);

    let client = reqwest::Client::new();
    let base = format!("http://127.0.0.1:{}", port);

    // Wait until the server answers.
    let mut ready = false;
    for _ in 0..50 {
        if client.get(format!("{}/health", base)).send().await.is_ok() {
            ready = true;
            break;
        }
        rt::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert!(ready, "server did not start");

    let resp = client
        .post(format!("{}/api/tasks", base))
        .json(&json!({
            "title": "Unauthorized Task",
            "dueDate": "2030-01-01T12:00:00"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key("www-authenticate"));
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Missing or malformed credentials");
    assert_eq!(services.tasks.count().await.unwrap(), 0);

    handle.stop(false).await;
}
