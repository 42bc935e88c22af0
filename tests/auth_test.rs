//! Authentication API integration tests
//!
//! Signup, login, current-user lookup, and token revocation.

mod common;

use axum::http::StatusCode;
use common::{bearer, signup_user, test_server};

#[tokio::test]
async fn test_signup_success() {
    let (server, _pool) = test_server().await;

    let response = server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "name": "Asha",
            "email": "asha@example.com",
            "password": "password123",
            "role": "owner",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["name"], "Asha");
    assert_eq!(body["user"]["email"], "asha@example.com");
    assert_eq!(body["user"]["role"], "owner");
}

#[tokio::test]
async fn test_signup_role_is_case_insensitive() {
    let (server, _pool) = test_server().await;

    let response = server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "name": "Asha",
            "email": "asha@example.com",
            "password": "password123",
            "role": "Viewer",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["user"]["role"], "viewer");
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let (server, _pool) = test_server().await;
    signup_user(&server, "Asha", "asha@example.com", "owner").await;

    let response = server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "name": "Other",
            "email": "asha@example.com",
            "password": "password123",
            "role": "member",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["category"], "invalid_input");
    assert_eq!(body["error"], "Email already registered");
}

#[tokio::test]
async fn test_signup_invalid_role() {
    let (server, _pool) = test_server().await;

    let response = server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "name": "Asha",
            "email": "asha@example.com",
            "password": "password123",
            "role": "manager",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["category"], "invalid_input");
}

#[tokio::test]
async fn test_signup_empty_field() {
    let (server, _pool) = test_server().await;

    let response = server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "name": "",
            "email": "asha@example.com",
            "password": "password123",
            "role": "owner",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Missing required field: name");
}

#[tokio::test]
async fn test_login_success() {
    let (server, _pool) = test_server().await;
    signup_user(&server, "Asha", "asha@example.com", "owner").await;

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": "asha@example.com",
            "password": "password123",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "asha@example.com");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (server, _pool) = test_server().await;
    signup_user(&server, "Asha", "asha@example.com", "owner").await;

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": "asha@example.com",
            "password": "wrongpassword",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let (server, _pool) = test_server().await;

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": "nobody@example.com",
            "password": "password123",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_valid_token() {
    let (server, _pool) = test_server().await;
    let user = signup_user(&server, "Asha", "asha@example.com", "admin").await;

    let (name, value) = bearer(&user);
    let response = server.get("/api/auth/me").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["email"], "asha@example.com");
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn test_me_without_token() {
    let (server, _pool) = test_server().await;

    let response = server.get("/api/auth/me").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_garbage_token() {
    let (server, _pool) = test_server().await;

    let response = server
        .get("/api/auth/me")
        .add_header(
            axum::http::header::AUTHORIZATION,
            axum::http::HeaderValue::from_static("Bearer not.a.token"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let (server, _pool) = test_server().await;
    let user = signup_user(&server, "Asha", "asha@example.com", "owner").await;

    let (name, value) = bearer(&user);
    let response = server.post("/api/auth/logout").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let (name, value) = bearer(&user);
    let response = server.get("/api/auth/me").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
