//! Shared test fixtures
//!
//! Spins up the full application router against an in-memory SQLite
//! database, plus helpers for registering users and seeding checklists
//! through the public API.

#![allow(dead_code)]

use std::str::FromStr;

use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use uuid::Uuid;

use packpal::auth::sessions::SessionStore;
use packpal::routes::create_router;
use packpal::server::state::AppState;

/// Create an in-memory test database pool with migrations applied
///
/// A single connection keeps every query on the same in-memory
/// database.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Failed to parse database URL")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Start a test server over a fresh in-memory database
pub async fn test_server() -> (TestServer, SqlitePool) {
    let pool = test_pool().await;
    let state = AppState {
        db: pool.clone(),
        sessions: SessionStore::new("test-secret"),
    };
    let server = TestServer::new(create_router(state)).expect("Failed to start test server");
    (server, pool)
}

/// A registered test user with their bearer token
pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub token: String,
}

/// Register a user through the signup endpoint
pub async fn signup_user(server: &TestServer, name: &str, email: &str, role: &str) -> TestUser {
    let response = server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "name": name,
            "email": email,
            "password": "password123",
            "role": role,
        }))
        .await;

    assert_eq!(
        response.status_code(),
        StatusCode::CREATED,
        "signup failed: {}",
        response.text()
    );

    let body: serde_json::Value = response.json();
    TestUser {
        id: Uuid::parse_str(body["user"]["id"].as_str().unwrap()).unwrap(),
        name: name.to_string(),
        token: body["token"].as_str().unwrap().to_string(),
    }
}

/// Build the Authorization header pair for a user
pub fn bearer(user: &TestUser) -> (HeaderName, HeaderValue) {
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", user.token)).unwrap(),
    )
}

/// Create a checklist through the API and return its id
pub async fn create_checklist(server: &TestServer, user: &TestUser, title: &str) -> Uuid {
    let (name, value) = bearer(user);
    let response = server
        .post("/api/checklists")
        .add_header(name, value)
        .json(&serde_json::json!({ "title": title }))
        .await;

    assert_eq!(
        response.status_code(),
        StatusCode::CREATED,
        "create checklist failed: {}",
        response.text()
    );

    let body: serde_json::Value = response.json();
    Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
}

/// Add a user to a checklist through the API
pub async fn add_member(server: &TestServer, actor: &TestUser, checklist_id: Uuid, user_id: Uuid) {
    let (name, value) = bearer(actor);
    let response = server
        .post(&format!("/api/members/{checklist_id}"))
        .add_header(name, value)
        .json(&serde_json::json!({ "user_id": user_id }))
        .await;

    assert_eq!(
        response.status_code(),
        StatusCode::CREATED,
        "add member failed: {}",
        response.text()
    );
}

/// Create an item through the API and return its id
pub async fn create_item(
    server: &TestServer,
    actor: &TestUser,
    checklist_id: Uuid,
    title: &str,
) -> Uuid {
    let (name, value) = bearer(actor);
    let response = server
        .post(&format!("/api/checklists/{checklist_id}/items"))
        .add_header(name, value)
        .json(&serde_json::json!({ "title": title }))
        .await;

    assert_eq!(
        response.status_code(),
        StatusCode::CREATED,
        "create item failed: {}",
        response.text()
    );

    let body: serde_json::Value = response.json();
    Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
}

/// Fetch a checklist's alerts through the API
pub async fn list_alerts(
    server: &TestServer,
    actor: &TestUser,
    checklist_id: Uuid,
) -> Vec<serde_json::Value> {
    let (name, value) = bearer(actor);
    let response = server
        .get(&format!("/api/alerts/{checklist_id}"))
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}
