// tests/common/mod.rs

#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use archetype_quiz::{
    config::Config,
    engine::QuestionBank,
    routes,
    state::{AppState, AttemptStore},
};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use url::Url;

pub const PASSWORD: &str = "password123";

/// Spawns the app on a random port over a fresh in-memory database.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
pub async fn spawn_app() -> String {
    spawn_app_with_pool().await.0
}

/// Like `spawn_app`, also handing back the pool the app writes to.
pub async fn spawn_app_with_pool() -> (String, SqlitePool) {
    // A single, never-recycled connection keeps the in-memory database alive.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        film_url: Url::parse("https://films.example.com/money-talk").unwrap(),
        static_dir: PathBuf::from("tests/static-does-not-exist"),
        question_bank_path: None,
        cookie_secure: false,
        allowed_origins: vec!["http://localhost:3000".to_string()],
    };

    let state = AppState {
        pool: pool.clone(),
        config,
        bank: Arc::new(QuestionBank::standard()),
        attempts: AttemptStore::default(),
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, pool)
}

pub fn unique_email() -> String {
    format!("viewer_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8])
}

pub async fn signup(client: &reqwest::Client, address: &str, email: &str) -> reqwest::Response {
    client
        .post(format!("{}/api/auth/signup", address))
        .json(&serde_json::json!({
            "email": email,
            "password": PASSWORD,
            "firstName": "Samara",
            "lastName": "Lee",
            "zipCode": "94110",
            "occupationStatus": "Employed"
        }))
        .send()
        .await
        .expect("Signup request failed")
}

/// Creates an account and returns its bearer token.
pub async fn register_and_login(client: &reqwest::Client, address: &str) -> String {
    let email = unique_email();
    assert_eq!(signup(client, address, &email).await.status().as_u16(), 201);

    let body = client
        .post(format!("{}/api/auth/signin", address))
        .json(&serde_json::json!({ "email": email, "password": PASSWORD }))
        .send()
        .await
        .expect("Signin request failed")
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse signin json");

    body["token"].as_str().expect("Token not found").to_string()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
