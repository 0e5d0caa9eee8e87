#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use chrono::Duration;
use serde_json::{json, Value};

use projecttasks::config::Config;
use projecttasks::routes;
use projecttasks::state::AppState;
use projecttasks::store::MemoryStore;

pub const PASSWORD: &str = "Password123!";

// Helper struct to hold auth details
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

pub fn test_config() -> Config {
    Config {
        database_url: None,
        database_max_connections: 1,
        server_port: 0,
        server_host: "127.0.0.1".to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        jwt_expiration: Duration::hours(1),
        bcrypt_cost: 4,
    }
}

pub fn test_state() -> AppState {
    AppState::new(Arc::new(MemoryStore::new()), &test_config())
        .expect("failed to build application state")
}

pub async fn init_app() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(App::new().configure(routes::configure_app(test_state()))).await
}

/// Sends a request and returns its status and JSON body (`Null` when empty).
pub async fn send(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    req: test::TestRequest,
) -> (StatusCode, Value) {
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    if body.is_empty() {
        return (status, Value::Null);
    }
    let json = serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!(
            "Response is not JSON ({}): {:?}",
            e,
            String::from_utf8_lossy(&body)
        )
    });
    (status, json)
}

pub fn with_token(req: test::TestRequest, token: &str) -> test::TestRequest {
    req.insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
}

pub async fn register_and_login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
) -> TestUser {
    let (status, body) = send(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Registration failed: {}", body);

    let (status, body) = send(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Login failed: {}", body);

    TestUser {
        id: body["id"].as_i64().expect("login response has no id"),
        token: body["token"]
            .as_str()
            .expect("login response has no token")
            .to_string(),
    }
}

pub async fn create_project(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    user: &TestUser,
    title: &str,
) -> i64 {
    let (status, body) = send(
        app,
        with_token(test::TestRequest::post().uri("/api/projects"), &user.token)
            .set_json(json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Project creation failed: {}", body);
    body["id"].as_i64().expect("project has no id")
}

pub async fn create_task(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    user: &TestUser,
    project_id: i64,
    title: &str,
) -> i64 {
    let (status, body) = send(
        app,
        with_token(
            test::TestRequest::post().uri(&format!("/api/projects/{}/tasks", project_id)),
            &user.token,
        )
        .set_json(json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Task creation failed: {}", body);
    body["id"].as_i64().expect("task has no id")
}
