//! Web API Auth Tests
//!
//! Integration tests for registration, login, logout, and the access guard.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{bearer, create_test_app, create_user_token, login, register_user, TEST_PASSWORD};

#[tokio::test]
async fn test_register_returns_user_id() {
    let app = create_test_app().await;

    let body = register_user(&app.server, "alice", TEST_PASSWORD).await;
    assert_eq!(body["data"]["message"], "User registered successfully");
    assert!(body["data"]["userId"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = create_test_app().await;
    register_user(&app.server, "alice", TEST_PASSWORD).await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({"username": "alice", "password": "another-password"}))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(body["error"]["message"], "Username already exists");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = create_test_app().await;

    for payload in [
        json!({"username": "alice"}),
        json!({"password": TEST_PASSWORD}),
        json!({}),
    ] {
        let response = app.server.post("/api/auth/register").json(&payload).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_register_short_password() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({"username": "alice", "password": "short"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = create_test_app().await;
    register_user(&app.server, "alice", TEST_PASSWORD).await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({"username": "alice", "password": TEST_PASSWORD}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["data"]["accessToken"].is_string());
    assert_eq!(body["data"]["tokenType"], "Bearer");
    assert_eq!(body["data"]["expiresIn"], 900);
    assert_eq!(body["data"]["user"]["username"], "alice");
    assert_eq!(body["data"]["message"], "Welcome alice!");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = create_test_app().await;
    register_user(&app.server, "alice", TEST_PASSWORD).await;

    let wrong_password = app
        .server
        .post("/api/auth/login")
        .json(&json!({"username": "alice", "password": "wrong-password"}))
        .await;
    let unknown_user = app
        .server
        .post("/api/auth/login")
        .json(&json!({"username": "nobody", "password": TEST_PASSWORD}))
        .await;

    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    unknown_user.assert_status(StatusCode::UNAUTHORIZED);

    let a: Value = wrong_password.json();
    let b: Value = unknown_user.json();
    assert_eq!(a["error"]["message"], "Invalid username or password");
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_me() {
    let app = create_test_app().await;
    let token = create_user_token(&app.server, "alice").await;

    let response = app
        .server
        .get("/api/auth/me")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["username"], "alice");
    assert!(body["data"]["createdAt"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = create_test_app().await;

    let response = app.server.get("/api/auth/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_forged_token_rejected() {
    let app = create_test_app().await;
    register_user(&app.server, "alice", TEST_PASSWORD).await;

    let forged = filedrawer::JwtKeys::new("some-other-secret", 900)
        .issue(1, "alice")
        .unwrap();

    let response = app
        .server
        .get("/api/folders")
        .add_header(AUTHORIZATION, bearer(&forged))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout() {
    let app = create_test_app().await;
    let token = login_after_register(&app.server).await;

    let response = app
        .server
        .post("/api/auth/logout")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        body["data"]["message"],
        "You have been logged out successfully."
    );

    let response = app.server.post("/api/auth/logout").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

async fn login_after_register(server: &axum_test::TestServer) -> String {
    register_user(server, "bob", TEST_PASSWORD).await;
    login(server, "bob", TEST_PASSWORD).await
}
