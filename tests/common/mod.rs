//! Shared helpers for web integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use blogpress::auth::{HashCost, TokenService};
use blogpress::template::TemplateLoader;
use blogpress::web::router::create_router;
use blogpress::{AppState, Database};
use axum_extra::extract::cookie::Cookie;
use serde_json::json;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Argon2 cost low enough to keep the suite fast.
pub fn cheap_hash_cost() -> HashCost {
    HashCost {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}

/// Application state over an in-memory database and the built-in templates.
pub async fn create_test_state() -> AppState {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let templates = TemplateLoader::builtin()
        .load_engine()
        .expect("Failed to load templates");

    AppState::new(db, TokenService::new(TEST_SECRET, 3600), templates)
        .with_hash_cost(cheap_hash_cost())
}

/// Create a test server over the real router with an in-memory database.
pub async fn create_test_server() -> (TestServer, Arc<AppState>) {
    let state = Arc::new(create_test_state().await);

    let server = TestServer::new(create_router(state.clone())).expect("Failed to create test server");

    (server, state)
}

/// Move both timestamps of a post one day into the past.
pub async fn backdate_post(state: &AppState, id: i64) {
    let past = chrono::Utc::now() - chrono::Duration::days(1);
    sqlx::query("UPDATE posts SET created_at = ?, updated_at = ? WHERE id = ?")
        .bind(past)
        .bind(past)
        .bind(id)
        .execute(state.db.pool())
        .await
        .expect("Failed to backdate post");
}

/// Register a user and assert it was created.
pub async fn register_user(server: &TestServer, username: &str, password: &str) {
    server
        .post("/register")
        .json(&json!({ "username": username, "password": password }))
        .await
        .assert_status(StatusCode::CREATED);
}

/// Log in and return the session cookie.
pub async fn login(server: &TestServer, username: &str, password: &str) -> Cookie<'static> {
    let response = server
        .post("/admin")
        .form(&[("username", username), ("password", password)])
        .await;

    response.assert_status(StatusCode::FOUND);
    response.cookie("token")
}

/// Register a user, log in and return the session cookie.
pub async fn admin_session(server: &TestServer) -> Cookie<'static> {
    register_user(server, "admin", "secret").await;
    login(server, "admin", "secret").await
}
