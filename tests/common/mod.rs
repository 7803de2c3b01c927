//! Common test utilities

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use expense_tracker::api::{self, AppState};
use expense_tracker::auth::TokenService;
use expense_tracker::db;
use expense_tracker::store::MemoryStore;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};
use tower::util::ServiceExt;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";

/// Lowest cost bcrypt accepts; keeps tests fast
pub const TEST_BCRYPT_COST: u32 = 4;

/// Tests sharing the database take turns, since each one truncates it
static DB_LOCK: Mutex<()> = Mutex::const_new(());

/// A migrated, empty database held exclusively by one test
pub struct TestDb {
    pub pool: PgPool,
    _guard: MutexGuard<'static, ()>,
}

/// Setup test database - migrate and truncate tables
///
/// Returns `None` when `DATABASE_URL` is not set so database tests are
/// skipped on machines without PostgreSQL.
pub async fn setup_test_db() -> Option<TestDb> {
    dotenvy::dotenv().ok();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL test");
        return None;
    };

    let guard = DB_LOCK.lock().await;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    // Clean up DB for fresh state
    sqlx::query("TRUNCATE TABLE transactions, users RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to clean up DB");

    Some(TestDb {
        pool,
        _guard: guard,
    })
}

/// Router backed by a fresh in-memory store
pub fn setup_app() -> Router {
    let tokens = TokenService::new(TEST_SECRET, 3600);
    let state = AppState::with_store(Arc::new(MemoryStore::new()), tokens, TEST_BCRYPT_COST);
    api::build_router(state)
}

/// Send a request and return status plus parsed body (JSON, or a JSON string for text bodies)
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, value)
}

/// Register a user and return a bearer token for it
pub async fn register_and_login(app: &Router, username: &str) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "password123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration of {username} failed");

    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login of {username} failed");

    body["token"].as_str().unwrap().to_string()
}

/// Create a transaction and return its JSON
pub async fn create_transaction(
    app: &Router,
    token: &str,
    amount: &str,
    date: &str,
    kind: &str,
    category: &str,
) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/transactions",
        Some(token),
        Some(json!({
            "amount": amount,
            "date": date,
            "description": format!("{category} on {date}"),
            "type": kind,
            "category": category,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body
}
